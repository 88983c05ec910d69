use crate::consts::{ FEQ_EPSILON, HIT_EPSILON };
use crate::tuple::{ Point3D, Vector3D };
use crate::color::Color;
use crate::ray::Ray;
use crate::intersect::{ Intersection, nearest_root };

/// A material record.
///
/// Only what local shading needs: the surface color, and the specular
/// exponent. A shininess of zero disables the specular highlight entirely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            shininess: 0.0,
        }
    }
}

impl Material {
    pub fn new(color: Color, shininess: f64) -> Material {
        Material { color, shininess }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeType {
    /// A sphere with a center and a radius.
    Sphere { center: Point3D, radius: f64 },

    /// An infinite plane through `point`, facing along `normal`.
    Plane { point: Point3D, normal: Vector3D },

    /// A cylinder whose axis is parallel to Y and passes through `center`.
    ///
    /// The cylinder spans `center.y + minimum` to `center.y + maximum` and is
    /// capped at both ends when `closed` is set.
    Cylinder {
        center: Point3D,
        radius: f64,
        minimum: f64,
        maximum: f64,
        closed: bool,
    },

    /// A double-napped cone with unit slope, its apex at `apex` and its axis
    /// parallel to Y.
    ///
    /// Bounds and caps work the same way as for `Cylinder`, relative to the
    /// apex.
    Cone {
        apex: Point3D,
        minimum: f64,
        maximum: f64,
        closed: bool,
    },
}

/// A primitive placed in world space, together with its material.
///
/// Shapes are plain data; a `World` owns them in a list, and everything else
/// refers to a shape by its index in that list.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,
}

impl Shape {
    /// Creates a sphere with the default material.
    pub fn sphere(center: Point3D, radius: f64) -> Shape {
        Shape {
            ty: ShapeType::Sphere { center, radius },
            material: Default::default(),
        }
    }

    /// Creates a plane. The normal is normalized here.
    pub fn plane(point: Point3D, normal: Vector3D) -> Shape {
        Shape {
            ty: ShapeType::Plane { point, normal: normal.normalize() },
            material: Default::default(),
        }
    }

    /// Creates an infinitely long cylinder with no end caps.
    pub fn cylinder(center: Point3D, radius: f64) -> Shape {
        Shape::bounded_cylinder(center, radius,
            -f64::INFINITY, f64::INFINITY, false)
    }

    /// Creates a bounded cylinder, optionally capped.
    pub fn bounded_cylinder(center: Point3D, radius: f64,
        minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape {
            ty: ShapeType::Cylinder { center, radius, minimum, maximum, closed },
            material: Default::default(),
        }
    }

    /// Creates an infinite double-napped cone.
    pub fn cone(apex: Point3D) -> Shape {
        Shape::bounded_cone(apex, -f64::INFINITY, f64::INFINITY, false)
    }

    /// Creates a bounded double-napped cone, optionally capped.
    pub fn bounded_cone(apex: Point3D, minimum: f64, maximum: f64,
        closed: bool) -> Shape {
        Shape {
            ty: ShapeType::Cone { apex, minimum, maximum, closed },
            material: Default::default(),
        }
    }

    /// Replaces the material of a shape, builder style.
    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Tests a ray against the shape.
    ///
    /// Returns the nearest intersection in front of the ray origin, along
    /// with the surface color there.
    pub fn hits(&self, ray: &Ray) -> Option<Intersection> {
        let t = match self.ty {
            ShapeType::Sphere { center, radius }
                => Self::intersect_sphere(ray, center, radius),
            ShapeType::Plane { point, normal }
                => Self::intersect_plane(ray, point, normal),
            ShapeType::Cylinder { center, radius, minimum, maximum, closed }
                => Self::intersect_cylinder(ray, center, radius,
                    minimum, maximum, closed),
            ShapeType::Cone { apex, minimum, maximum, closed }
                => Self::intersect_cone(ray, apex, minimum, maximum, closed),
        }?;

        Some(Intersection::new(t, self.material.color))
    }

    /// Returns the outward-facing unit normal at a point on the surface.
    ///
    /// The point is assumed to lie on the shape; no check is made.
    pub fn normal_at(&self, at: Point3D) -> Vector3D {
        match self.ty {
            ShapeType::Sphere { center, .. } => (at - center).normalize(),
            ShapeType::Plane { normal, .. } => normal,
            ShapeType::Cylinder { center, radius, minimum, maximum, closed }
                => Self::normal_at_cylinder(at - center, radius,
                    minimum, maximum, closed),
            ShapeType::Cone { apex, minimum, maximum, closed }
                => Self::normal_at_cone(at - apex, minimum, maximum, closed),
        }
    }

    fn intersect_sphere(ray: &Ray, center: Point3D, radius: f64)
        -> Option<f64> {
        let sphere_to_ray = ray.origin - center;

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - radius.powi(2);

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return None;
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        nearest_root(&[t1, t2], HIT_EPSILON)
    }

    fn intersect_plane(ray: &Ray, point: Point3D, normal: Vector3D)
        -> Option<f64> {
        // A ray running along the plane never meets it.
        let denom = normal.dot(&ray.direction);
        if denom.abs() <= FEQ_EPSILON {
            return None;
        }

        let t = (point - ray.origin).dot(&normal) / denom;
        nearest_root(&[t], HIT_EPSILON)
    }

    fn intersect_cylinder(ray: &Ray, center: Point3D, radius: f64,
        minimum: f64, maximum: f64, closed: bool) -> Option<f64> {
        let origin = ray.origin - center;
        let direction = ray.direction;

        // Up to two wall roots and two cap roots.
        let mut roots = [f64::NAN; 4];

        let a = direction.x.powi(2) + direction.z.powi(2);

        // A ray parallel to the axis can only meet the caps.
        if a >= FEQ_EPSILON {
            let b = 2.0 * origin.x * direction.x
                  + 2.0 * origin.z * direction.z;
            let c = origin.x.powi(2) + origin.z.powi(2) - radius.powi(2);

            let disc = b.powi(2) - 4.0 * a * c;
            if disc >= 0.0 {
                let t0 = (-b - disc.sqrt()) / (2.0 * a);
                let t1 = (-b + disc.sqrt()) / (2.0 * a);

                for (slot, t) in roots.iter_mut().zip([t0, t1].iter()) {
                    let y = origin.y + t * direction.y;
                    if minimum < y && y < maximum {
                        *slot = *t;
                    }
                }
            }
        }

        if closed {
            Self::intersect_caps(&origin, &direction, minimum, maximum,
                |_| radius.powi(2), &mut roots[2..]);
        }

        nearest_root(&roots, HIT_EPSILON)
    }

    fn intersect_cone(ray: &Ray, apex: Point3D, minimum: f64, maximum: f64,
        closed: bool) -> Option<f64> {
        let origin = ray.origin - apex;
        let direction = ray.direction;

        let mut roots = [f64::NAN; 4];

        let a = direction.x.powi(2)
              - direction.y.powi(2)
              + direction.z.powi(2);

        let b = 2.0 * origin.x * direction.x
              - 2.0 * origin.y * direction.y
              + 2.0 * origin.z * direction.z;

        let c = origin.x.powi(2)
              - origin.y.powi(2)
              + origin.z.powi(2);

        let mut walls = [f64::NAN; 2];
        if a.abs() < FEQ_EPSILON {
            // Parallel to one of the nappes: at most a single root.
            if b.abs() >= FEQ_EPSILON {
                walls[0] = -c / (2.0 * b);
            }
        } else {
            let disc = b.powi(2) - 4.0 * a * c;
            if disc >= 0.0 {
                walls[0] = (-b - disc.sqrt()) / (2.0 * a);
                walls[1] = (-b + disc.sqrt()) / (2.0 * a);
            }
        }

        for (slot, t) in roots.iter_mut().zip(walls.iter()) {
            let y = origin.y + t * direction.y;
            if minimum < y && y < maximum {
                *slot = *t;
            }
        }

        if closed {
            Self::intersect_caps(&origin, &direction, minimum, maximum,
                |y| y.powi(2), &mut roots[2..]);
        }

        nearest_root(&roots, HIT_EPSILON)
    }

    /// Tests a ray (in the shape's local frame) against the two end caps.
    ///
    /// `radius_sq` gives the squared cap radius at a given height. Roots are
    /// written into `out`, which must hold two values.
    fn intersect_caps<F>(origin: &Vector3D, direction: &Vector3D,
        minimum: f64, maximum: f64, radius_sq: F, out: &mut [f64])
        where F: Fn(f64) -> f64 {
        // Caps are only visible to a ray that moves along Y.
        if direction.y.abs() < FEQ_EPSILON {
            return;
        }

        for (slot, y) in out.iter_mut().zip([minimum, maximum].iter()) {
            if !y.is_finite() {
                continue;
            }

            let t = (y - origin.y) / direction.y;
            let x = origin.x + t * direction.x;
            let z = origin.z + t * direction.z;
            if x.powi(2) + z.powi(2) <= radius_sq(*y) {
                *slot = t;
            }
        }
    }

    fn normal_at_cylinder(at: Vector3D, radius: f64, minimum: f64,
        maximum: f64, closed: bool) -> Vector3D {
        // Calculate the square of the distance from the axis.
        let dist = at.x.powi(2) + at.z.powi(2);

        if closed && dist < radius.powi(2) && at.y >= maximum - FEQ_EPSILON {
            Vector3D::vector(0.0, 1.0, 0.0)
        } else if closed && dist < radius.powi(2)
            && at.y <= minimum + FEQ_EPSILON {
            Vector3D::vector(0.0, -1.0, 0.0)
        } else {
            Vector3D::vector(at.x, 0.0, at.z).normalize()
        }
    }

    fn normal_at_cone(at: Vector3D, minimum: f64, maximum: f64,
        closed: bool) -> Vector3D {
        let dist = at.x.powi(2) + at.z.powi(2);

        if closed && dist < maximum.powi(2) && at.y >= maximum - FEQ_EPSILON {
            return Vector3D::vector(0.0, 1.0, 0.0);
        }
        if closed && dist < minimum.powi(2) && at.y <= minimum + FEQ_EPSILON {
            return Vector3D::vector(0.0, -1.0, 0.0);
        }

        let mut y = dist.sqrt();
        if at.y > 0.0 {
            y = -y;
        }

        Vector3D::vector(at.x, y, at.z).normalize()
    }
}

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray {
    Ray::new(
        Point3D::point(origin.0, origin.1, origin.2),
        Vector3D::vector(direction.0, direction.1, direction.2),
    )
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, -5.0), 1.0);
    let i = s.hits(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0))).unwrap();

    assert!(crate::feq(i.distance, 4.0));
    assert_eq!(i.color, Color::white());
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 1.0);
    let i = s.hits(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(crate::feq(i.distance, 5.0));
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 1.0);

    assert!(s.hits(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0))).is_none());
}

#[test]
fn ray_is_inside_sphere() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 1.0);
    let i = s.hits(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(crate::feq(i.distance, 1.0));
}

#[test]
fn sphere_is_behind_ray() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 1.0);

    assert!(s.hits(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0))).is_none());
}

#[test]
fn sphere_reports_material_color() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 2.0)
        .with_material(Material::new(Color::red(), 10.0));
    let i = s.hits(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(crate::feq(i.distance, 3.0));
    assert_eq!(i.color, Color::red());
    assert_eq!(s.material().shininess, 10.0);
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere(Point3D::point(0.0, 1.0, 0.0), 1.0);
    let n = s.normal_at(Point3D::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Vector3D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_scaled_sphere_is_unit() {
    let s = Shape::sphere(Point3D::point(0.0, 0.0, 0.0), 3.0);
    let n = s.normal_at(Point3D::point(3.0, 0.0, 0.0));

    assert_eq!(n, Vector3D::vector(1.0, 0.0, 0.0));
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane(Point3D::point(0.0, 0.0, 0.0),
        Vector3D::vector(0.0, 2.0, 0.0));
    let i = p.hits(&ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0))).unwrap();

    assert!(crate::feq(i.distance, 1.0));
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane(Point3D::point(0.0, 0.0, 0.0),
        Vector3D::vector(0.0, 1.0, 0.0));
    let i = p.hits(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0))).unwrap();

    assert!(crate::feq(i.distance, 1.0));
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane(Point3D::point(0.0, 0.0, 0.0),
        Vector3D::vector(0.0, 1.0, 0.0));

    assert!(p.hits(&ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0))).is_none());
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane(Point3D::point(0.0, -1.0, 0.0),
        Vector3D::vector(0.0, 3.0, 0.0));

    assert_eq!(p.normal_at(Point3D::point(10.0, -1.0, -10.0)),
        Vector3D::vector(0.0, 1.0, 0.0));
    assert_eq!(p.normal_at(Point3D::point(-5.0, -1.0, 150.0)),
        Vector3D::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_misses_cylinder() {
    let c = Shape::cylinder(Point3D::point(0.0, 0.0, 0.0), 1.0);

    assert!(c.hits(&ray((1.0, 0.0, 0.0), (0.0, 1.0, 0.0))).is_none());
    assert!(c.hits(&ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0))).is_none());
    assert!(c.hits(&ray((0.0, 0.0, -5.0), (1.0, 1.0, 1.0))).is_none());
}

#[test]
fn ray_strikes_cylinder() {
    let c = Shape::cylinder(Point3D::point(0.0, 0.0, 0.0), 1.0);

    let i = c.hits(&ray((1.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();
    assert!(crate::feq(i.distance, 5.0));

    let i = c.hits(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();
    assert!(crate::feq(i.distance, 4.0));
}

#[test]
fn ray_strikes_offset_cylinder_with_radius() {
    let c = Shape::cylinder(Point3D::point(3.0, 0.0, 0.0), 2.0);
    let i = c.hits(&ray((3.0, 7.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(crate::feq(i.distance, 3.0));
}

#[test]
fn bounded_cylinder_ignores_hits_outside_bounds() {
    let c = Shape::bounded_cylinder(Point3D::point(0.0, 0.0, 0.0), 1.0,
        1.0, 2.0, false);

    assert!(c.hits(&ray((0.0, 3.0, -5.0), (0.0, 0.0, 1.0))).is_none());
    assert!(c.hits(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0))).is_none());
    assert!(c.hits(&ray((0.0, 1.5, -2.0), (0.0, 0.0, 1.0))).is_some());
}

#[test]
fn capped_cylinder_is_hit_along_axis() {
    let c = Shape::bounded_cylinder(Point3D::point(0.0, 0.0, 0.0), 1.0,
        1.0, 2.0, true);
    let i = c.hits(&ray((0.0, 3.0, 0.0), (0.0, -1.0, 0.0))).unwrap();

    assert!(crate::feq(i.distance, 1.0));
    assert_eq!(c.normal_at(Point3D::point(0.0, 2.0, 0.5)),
        Vector3D::vector(0.0, 1.0, 0.0));
    assert_eq!(c.normal_at(Point3D::point(0.5, 1.0, 0.0)),
        Vector3D::vector(0.0, -1.0, 0.0));
}

#[test]
fn normal_on_cylinder_wall() {
    let c = Shape::cylinder(Point3D::point(0.0, 0.0, 0.0), 1.0);

    assert_eq!(c.normal_at(Point3D::point(1.0, 0.0, 0.0)),
        Vector3D::vector(1.0, 0.0, 0.0));
    assert_eq!(c.normal_at(Point3D::point(0.0, 5.0, -1.0)),
        Vector3D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_strikes_cone() {
    let c = Shape::cone(Point3D::point(0.0, 0.0, 0.0));

    let i = c.hits(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();
    assert!(crate::feq(i.distance, 5.0));

    let i = c.hits(&ray((1.0, 1.0, -5.0), (-0.5, -1.0, 1.0))).unwrap();
    assert!(crate::feq(i.distance, 4.55006));
}

#[test]
fn ray_parallel_to_cone_half() {
    let c = Shape::cone(Point3D::point(0.0, 0.0, 0.0));
    let i = c.hits(&ray((0.0, 0.0, -1.0), (0.0, 1.0, 1.0))).unwrap();

    assert!(crate::feq(i.distance, 0.35355));
}

#[test]
fn capped_cone_end_caps() {
    let c = Shape::bounded_cone(Point3D::point(0.0, 0.0, 0.0),
        -0.5, 0.5, true);

    assert!(c.hits(&ray((0.0, 0.0, -5.0), (0.0, 1.0, 0.0))).is_none());
    assert!(c.hits(&ray((0.0, 0.0, -0.25), (0.0, 1.0, 0.0))).is_some());
}

#[test]
fn normal_on_cone() {
    let c = Shape::cone(Point3D::point(0.0, 0.0, 0.0));

    assert_eq!(c.normal_at(Point3D::point(1.0, 1.0, 1.0)),
        Vector3D::vector(1.0, -(2.0f64.sqrt()), 1.0).normalize());
    assert_eq!(c.normal_at(Point3D::point(-1.0, -1.0, 0.0)),
        Vector3D::vector(-1.0, 1.0, 0.0).normalize());
}
