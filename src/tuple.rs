use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A triple of coordinates.
///
/// The same type backs both points and vectors; the `Point3D` and `Vector3D`
/// aliases only document intent. Subtracting two points yields the vector
/// between them, and adding a vector to a point moves the point.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tuple3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A location in space.
pub type Point3D = Tuple3D;

/// A direction (and magnitude) in space.
pub type Vector3D = Tuple3D;

/// Tuples are compared component-wise, accounting for floating point error.
impl PartialEq for Tuple3D {
    fn eq(&self, other: &Tuple3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Tuple3D {
    pub fn new(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Point3D {
        Tuple3D { x, y, z }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Vector3D {
        Tuple3D { x, y, z }
    }

    pub fn origin() -> Point3D {
        Default::default()
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Scales a vector to unit length.
    ///
    /// Normalizing the zero vector divides by zero and produces NaN
    /// components; callers are expected to rule that out.
    pub fn normalize(&self) -> Tuple3D {
        let mag = self.magnitude();

        Tuple3D {
            x: self.x * (1.0 / mag),
            y: self.y * (1.0 / mag),
            z: self.z * (1.0 / mag),
        }
    }

    pub fn dot(&self, other: &Tuple3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Tuple3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Tuple3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Tuple3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a tuple.
///
/// ```
/// use whitted::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Tuple3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a tuple.
///
/// ```
/// use whitted::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * t, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Tuple3D> for f64 {
    type Output = Tuple3D;

    fn mul(self, other: Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

impl Div<f64> for Tuple3D {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

/* Tests */

#[test]
fn add_tuples() {
    let a1 = Tuple3D::new(3.0, -2.0, 5.0);
    let a2 = Tuple3D::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Tuple3D::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple3D::point(3.0, 2.0, 1.0);
    let p2 = Tuple3D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple3D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Tuple3D::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_and_div_scalar() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(a * 3.5, Tuple3D::new(3.5, -7.0, 10.5));
    assert_eq!(a / 2.0, Tuple3D::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Tuple3D::vector(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple3D::vector(1.0, 2.0, 3.0);
    let e = Tuple3D::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
    assert!(crate::feq(v.normalize().magnitude(), 1.0));
}

#[test]
fn normalize_zero_is_not_finite() {
    assert!(!Tuple3D::vector(0.0, 0.0, 0.0).normalize().is_finite());
}

#[test]
fn dot_vectors() {
    let a = Tuple3D::vector(1.0, 2.0, 3.0);
    let b = Tuple3D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple3D::vector(1.0, 2.0, 3.0);
    let b = Tuple3D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple3D::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple3D::vector(1.0, -2.0, 1.0));
}
