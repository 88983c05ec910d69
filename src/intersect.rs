use crate::color::Color;
use crate::tuple::Point3D;

/// A shape's own report of where a ray meets it.
///
/// `distance` is the ray parameter of the nearest root the shape accepts, and
/// `color` the surface color at that point. Shapes only ever report roots in
/// front of the ray origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub distance: f64,
    pub color: Color,
}

impl Intersection {
    pub fn new(distance: f64, color: Color) -> Intersection {
        Intersection { distance, color }
    }
}

/// The nearest surface a ray meets among all shapes of a world.
///
/// The shape is identified by its index in the world's shape list. Shadow
/// rays use this index to skip the shape being shaded, which stays correct
/// even when two shapes have identical geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// Distance along the ray to the hit point.
    pub distance: f64,

    /// The color the shape reported for the hit.
    pub color: Color,

    /// The hit point, `origin + direction * distance`.
    pub point: Point3D,

    /// Index of the shape that was hit.
    pub shape: usize,
}

/// Picks the smallest root in front of a ray, if any.
///
/// Roots at or below `min` (typically a small epsilon) are rejected, as are
/// non-finite roots.
pub(crate) fn nearest_root(roots: &[f64], min: f64) -> Option<f64> {
    roots.iter()
        .copied()
        .filter(|t| t.is_finite() && *t > min)
        .fold(None, |best, t| match best {
            Some(b) if b <= t => Some(b),
            _ => Some(t),
        })
}

#[test]
fn nearest_root_with_all_positive() {
    assert_eq!(nearest_root(&[2.0, 1.0], 0.0), Some(1.0));
}

#[test]
fn nearest_root_with_some_negative() {
    assert_eq!(nearest_root(&[-1.0, 1.0], 0.0), Some(1.0));
}

#[test]
fn nearest_root_with_all_negative() {
    assert_eq!(nearest_root(&[-2.0, -1.0], 0.0), None);
}

#[test]
fn nearest_root_skips_non_finite() {
    assert_eq!(nearest_root(&[f64::NAN, f64::INFINITY, 3.0], 0.0), Some(3.0));
}
