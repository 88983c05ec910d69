use crate::ray::Ray;
use crate::tuple::{ Point3D, Vector3D };
use crate::color::Color;
use crate::world::World;

/// A pinhole camera.
///
/// The camera is placed at `origin` and looks along `direction`. The `up`
/// vector only seeds the orthonormal basis used for ray generation: the
/// vertical axis of the image is always rederived as `direction × right`, so
/// an `up` that is not perpendicular to `direction` does not roll the image.
///
/// Direction and up are normalized on construction, whatever the caller
/// passes in. They must not be parallel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub origin: Point3D,
    pub direction: Vector3D,
    pub up: Vector3D,
}

impl Default for Camera {
    /// A camera at the world origin looking down negative Z, with Y up.
    fn default() -> Camera {
        Camera::new(
            Point3D::origin(),
            Vector3D::vector(0.0, 0.0, -1.0),
            Vector3D::vector(0.0, 1.0, 0.0),
        )
    }
}

impl Camera {
    pub fn new(origin: Point3D, direction: Vector3D, up: Vector3D) -> Camera {
        Camera {
            origin,
            direction: direction.normalize(),
            up: up.normalize(),
        }
    }

    /// The right and (rederived) up axes of the image plane.
    ///
    /// Both are finite only when `up` and `direction` span a plane; a parallel
    /// pair yields NaN components.
    pub fn basis(&self) -> (Vector3D, Vector3D) {
        let right = self.up.cross(&self.direction).normalize();
        let adjusted_up = self.direction.cross(&right).normalize();

        (right, adjusted_up)
    }

    /// Whether `up` and `direction` produce a usable basis.
    pub fn has_valid_basis(&self) -> bool {
        let (right, adjusted_up) = self.basis();
        right.is_finite() && adjusted_up.is_finite()
    }

    /// Generates the primary ray through a point of the image plane.
    ///
    /// `u` runs across the width of the image and `v` across its height,
    /// both in `0.0..=1.0`; `(0.5, 0.5)` is the image center, and the ray
    /// through it points exactly along `direction`. `fov` is the vertical
    /// field of view in degrees and `aspect_ratio` is width over height.
    pub fn ray(&self, u: f64, v: f64, fov: f64, aspect_ratio: f64) -> Ray {
        let (right, adjusted_up) = self.basis();
        debug_assert!(right.is_finite() && adjusted_up.is_finite(),
            "camera up vector must not be parallel to its direction");

        let scale = (fov * 0.5).to_radians().tan();

        let direction = right * ((u - 0.5) * scale * aspect_ratio)
            + adjusted_up * ((v - 0.5) * scale)
            + self.direction;

        Ray::new(self.origin, direction)
    }

    /// Traces a ray through a world and returns the color it sees.
    ///
    /// A ray that hits nothing yields the background color (the default
    /// color), whatever `lit` says. Otherwise, when `lit` is set, the hit is
    /// shaded with ambient, diffuse and specular light and hard shadows; when
    /// it is not, the surface color is returned as the shape reported it.
    pub fn trace_ray(&self, ray: &Ray, world: &World, lit: bool) -> Color {
        let hit = match world.nearest_hit(ray) {
            Some(hit) => hit,
            None => return Color::default(),
        };

        if lit {
            world.shade_hit(&hit, ray.direction.normalize())
        } else {
            hit.color
        }
    }
}

#[cfg(test)]
use crate::shape::{ Shape, Material };
#[cfg(test)]
use crate::light::Light;

#[cfg(test)]
fn sphere_world(color: Color, shininess: f64) -> World {
    let mut w = World::empty();
    w.shapes = vec![Shape::sphere(Point3D::point(0.0, 0.0, -5.0), 1.0)
        .with_material(Material::new(color, shininess))];
    w
}

#[test]
fn camera_normalizes_its_vectors() {
    let c = Camera::new(Point3D::point(1.0, 2.0, 3.0),
        Vector3D::vector(0.0, 0.0, -4.0), Vector3D::vector(0.0, 2.0, 0.0));

    assert_eq!(c.direction, Vector3D::vector(0.0, 0.0, -1.0));
    assert_eq!(c.up, Vector3D::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_through_center() {
    let c = Camera::default();

    for &(fov, aspect) in [(60.0, 1.0), (90.0, 16.0 / 9.0), (10.0, 0.5)].iter() {
        let r = c.ray(0.5, 0.5, fov, aspect);
        assert_eq!(r.origin, Point3D::point(0.0, 0.0, 0.0));
        assert_eq!(r.direction, Vector3D::vector(0.0, 0.0, -1.0));
    }
}

#[test]
fn ray_through_center_of_tilted_camera() {
    let direction = Vector3D::vector(1.0, -1.0, -2.0);
    let c = Camera::new(Point3D::point(3.0, 4.0, 5.0), direction,
        Vector3D::vector(0.0, 1.0, 0.0));
    let r = c.ray(0.5, 0.5, 45.0, 2.0);

    assert_eq!(r.origin, Point3D::point(3.0, 4.0, 5.0));
    assert_eq!(r.direction, direction.normalize());
}

#[test]
fn ray_through_corner() {
    // With a 90 degree field of view the image plane spans one unit on each
    // side of the center, at one unit from the camera.
    let c = Camera::default();
    let (right, _) = c.basis();

    let r = c.ray(1.0, 1.0, 90.0, 1.0);
    let expected = (right * 0.5 + Vector3D::vector(0.0, 0.5, -1.0)).normalize();
    assert_eq!(r.direction, expected);
    assert!(r.direction.y > 0.0);
}

#[test]
fn basis_ignores_non_perpendicular_up() {
    let c = Camera::new(Point3D::origin(), Vector3D::vector(0.0, 0.0, -1.0),
        Vector3D::vector(0.0, 1.0, -1.0));
    let (right, adjusted_up) = c.basis();

    assert!(crate::feq(right.dot(&c.direction), 0.0));
    assert!(crate::feq(adjusted_up.dot(&c.direction), 0.0));
    assert!(crate::feq(adjusted_up.magnitude(), 1.0));
    assert_ne!(adjusted_up, c.up);
}

#[test]
fn parallel_up_is_an_invalid_basis() {
    let c = Camera::new(Point3D::origin(), Vector3D::vector(0.0, 1.0, 0.0),
        Vector3D::vector(0.0, 3.0, 0.0));

    assert!(!c.has_valid_basis());
    assert!(Camera::default().has_valid_basis());
}

#[test]
fn trace_ray_miss_is_background() {
    let c = Camera::default();
    let mut w = sphere_world(Color::red(), 0.0);
    w.ambient = Color::rgba(1.0, 1.0, 1.0, 1.0);

    let r = Ray::new(Point3D::origin(), Vector3D::vector(0.0, 1.0, 0.0));
    assert_eq!(c.trace_ray(&r, &w, true), Color::default());
    assert_eq!(c.trace_ray(&r, &w, false), Color::default());
}

#[test]
fn flat_trace_is_surface_color() {
    let c = Camera::default();
    let surface = Color::rgba(300.0, 20.0, 10.0, 255.0);
    let mut w = sphere_world(surface, 50.0);
    w.ambient = Color::rgba(0.5, 0.5, 0.5, 1.0);
    w.lights = vec![Light::point(Point3D::origin(), Color::white(), 1.0)];

    // Unlit colors are returned exactly as reported, without clamping.
    let r = c.ray(0.5, 0.5, 60.0, 1.0);
    assert_eq!(c.trace_ray(&r, &w, false), surface);
}

#[test]
fn lit_trace_without_lights_is_ambient() {
    let c = Camera::default();
    let mut w = sphere_world(Color::rgb(200.0, 100.0, 50.0), 0.0);
    w.ambient = Color::rgba(0.5, 0.25, 1.0, 1.0);

    let r = c.ray(0.5, 0.5, 60.0, 1.0);
    assert_eq!(c.trace_ray(&r, &w, true),
        Color::rgba(100.0, 25.0, 50.0, 255.0));
}

#[test]
fn lit_trace_is_clamped() {
    let c = Camera::default();
    let mut w = sphere_world(Color::white(), 0.0);
    w.ambient = Color::rgba(2.0, 2.0, 2.0, 2.0);

    let r = c.ray(0.5, 0.5, 60.0, 1.0);
    assert_eq!(c.trace_ray(&r, &w, true), Color::white());
}

#[test]
fn zero_shininess_has_no_specular() {
    let c = Camera::default();
    let light = Light::point(Point3D::origin(),
        Color::rgb(100.0, 100.0, 100.0), 1.0);
    let r = c.ray(0.5, 0.5, 60.0, 1.0);

    // Light, eye and normal all line up: diffuse is 100 * 100 / 255, and the
    // highlight, when enabled, adds the full light color.
    let mut w = sphere_world(Color::rgb(100.0, 100.0, 100.0), 0.0);
    w.lights = vec![light];
    let diffuse_only = c.trace_ray(&r, &w, true);
    assert!(crate::feq(diffuse_only.r, 100.0 * 100.0 / 255.0));

    let mut w = sphere_world(Color::rgb(100.0, 100.0, 100.0), 8.0);
    w.lights = vec![light];
    let with_specular = c.trace_ray(&r, &w, true);
    assert!(crate::feq(with_specular.r, 100.0 * 100.0 / 255.0 + 100.0));
}

#[test]
fn sphere_lit_from_above() {
    // Unit sphere five units in front of the camera, a directional light
    // coming down from +Y (and away from the camera), no ambient light.
    let c = Camera::default();
    let mut w = sphere_world(Color::rgb(200.0, 150.0, 100.0), 0.0);
    w.lights = vec![Light::directional(Vector3D::vector(0.0, -1.0, -1.0),
        Color::white(), 1.0)];

    let r = c.ray(0.5, 0.5, 60.0, 4.0 / 3.0);
    let color = c.trace_ray(&r, &w, true);

    // The hit point faces the camera, at 45 degrees from the light.
    let dot = 2.0f64.sqrt() / 2.0;
    assert_ne!(color, Color::default());
    assert_eq!(color, Color::rgba(200.0 * dot, 150.0 * dot, 100.0 * dot, 1.0));
}

#[test]
fn sphere_lit_from_behind_has_no_diffuse() {
    // Same scene, but the light comes from behind the sphere: only the zero
    // ambient term and the alpha of the light pass remain.
    let c = Camera::default();
    let mut w = sphere_world(Color::rgb(200.0, 150.0, 100.0), 0.0);
    w.lights = vec![Light::directional(Vector3D::vector(0.0, 0.0, 1.0),
        Color::white(), 1.0)];

    let r = c.ray(0.5, 0.5, 60.0, 1.0);
    assert_eq!(c.trace_ray(&r, &w, true), Color::rgba(0.0, 0.0, 0.0, 1.0));
}
