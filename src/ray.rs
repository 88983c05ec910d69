use crate::tuple::{ Point3D, Vector3D };

/// A half-line cast into the scene.
///
/// The direction is normalized on construction, so the parameter `t` of
/// `position` is a true distance from the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Point3D,
    pub direction: Vector3D,
}

impl Ray {
    pub fn new(origin: Point3D, direction: Vector3D) -> Ray {
        Ray { origin, direction: direction.normalize() }
    }

    pub fn position(&self, t: f64) -> Point3D {
        self.origin + (self.direction * t)
    }
}

#[test]
fn ray_direction_is_normalized() {
    let r = Ray::new(
                Point3D::point(2.0, 3.0, 4.0),
                Vector3D::vector(0.0, 0.0, -5.0)
            );

    assert_eq!(r.direction, Vector3D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Point3D::point(2.0, 3.0, 4.0),
                Vector3D::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Point3D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Point3D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Point3D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Point3D::point(4.5, 3.0, 4.0));
}
