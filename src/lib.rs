pub mod consts;
pub mod error;

pub mod tuple;
pub mod ray;
pub mod color;

pub mod intersect;
pub mod shape;
pub mod light;

pub mod world;
pub mod camera;
pub mod scene;

pub mod canvas;
pub mod parallel;

pub use error::{ Error, Result };

use consts::FEQ_EPSILON;

/// Compares two floats, tolerating accumulated rounding error.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
