use std::io;

use thiserror::Error;

/// Errors raised while loading a scene, rendering it, or writing the result.
///
/// Tracing itself never fails; everything here happens around it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{field}` must have 3 components, found {len}")]
    InvalidVector { field: &'static str, len: usize },

    #[error("`{field}` must have 3 or 4 channels, found {len}")]
    InvalidColor { field: &'static str, len: usize },

    #[error("shape #{index} is invalid: {reason}")]
    InvalidShape { index: usize, reason: &'static str },

    #[error("light #{index} is invalid: {reason}")]
    InvalidLight { index: usize, reason: &'static str },

    #[error("camera up vector is parallel to its direction")]
    DegenerateCamera,

    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: usize, height: usize },

    #[error("could not start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
