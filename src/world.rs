use crate::consts::SHADOW_BIAS;
use crate::ray::Ray;
use crate::tuple::Vector3D;
use crate::color::Color;
use crate::shape::Shape;
use crate::light::{ Light, lighting };
use crate::intersect::Hit;

/// A world with objects and lights.
///
/// Worlds own every shape and light for rendering, plus the ambient light
/// color. Shapes are identified by their index in `shapes`, so the order of
/// that list must not change while a frame is being traced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub shapes: Vec<Shape>,
    pub lights: Vec<Light>,

    /// Ambient light, multiplied channel by channel with surface colors. It
    /// is usually expressed as a fraction in `0.0..=1.0` per channel.
    pub ambient: Color,
}

impl World {
    /// Creates an empty world with no objects, no lights and no ambient light.
    pub fn empty() -> World {
        Default::default()
    }

    /// Finds the nearest shape a ray hits.
    ///
    /// Every shape is tested in list order. A candidate only replaces the
    /// current best if it is strictly closer and strictly in front of the ray
    /// origin, so the first of two shapes at the same distance wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut min_distance = f64::INFINITY;
        let mut nearest = None;

        for (index, shape) in self.shapes.iter().enumerate() {
            let i = match shape.hits(ray) {
                Some(i) => i,
                None => continue,
            };

            if i.distance < min_distance && i.distance > 0.0 {
                min_distance = i.distance;
                nearest = Some(Hit {
                    distance: i.distance,
                    color: i.color,
                    point: ray.position(i.distance),
                    shape: index,
                });
            }
        }

        nearest
    }

    /// Determines whether a light is blocked from reaching a hit point.
    ///
    /// The shadow ray starts slightly off the surface, towards the light, and
    /// the shape being shaded is excluded from the test by index.
    pub fn is_shadowed(&self, hit: &Hit, light: &Light) -> bool {
        let light_dir = light.direction_to_point(hit.point).normalize();
        let origin = hit.point - light_dir * SHADOW_BIAS;
        let shadow_ray = Ray::new(origin, -light_dir);

        // The length of the (unit) light direction is deducted from the
        // distance to the light.
        let light_distance = light.distance(hit.point) - light_dir.magnitude();

        self.shapes.iter()
            .enumerate()
            .filter(|(index, _)| *index != hit.shape)
            .filter_map(|(_, shape)| shape.hits(&shadow_ray))
            .any(|i| i.distance < light_distance)
    }

    /// Calculates the color for a hit, based on shadows and light.
    ///
    /// Ambient light is applied once, whatever the shadows; each light that
    /// is not blocked then adds its diffuse and specular terms. The result is
    /// clamped to the displayable range.
    pub fn shade_hit(&self, hit: &Hit, view_dir: Vector3D) -> Color {
        let shape = &self.shapes[hit.shape];
        let shininess = shape.material().shininess;

        let mut color = self.ambient * hit.color;

        for light in self.lights.iter() {
            if self.is_shadowed(hit, light) {
                continue;
            }

            let light_dir = light.direction_to_point(hit.point).normalize();
            let light_color = light.intensity_at(hit.point);
            let normal = -shape.normal_at(hit.point);

            color += lighting(hit.color, shininess, light_color,
                light_dir, normal, view_dir);
        }

        color.clamp()
    }
}

#[cfg(test)]
mod fixtures {
    use super::*;
    use crate::shape::Material;
    use crate::tuple::Point3D;

    pub fn sphere(z: f64, color: Color) -> Shape {
        Shape::sphere(Point3D::point(0.0, 0.0, z), 1.0)
            .with_material(Material::new(color, 0.0))
    }

    pub fn forward_ray() -> Ray {
        Ray::new(Point3D::point(0.0, 0.0, 0.0), Vector3D::vector(0.0, 0.0, -1.0))
    }
}

#[test]
fn nearest_hit_regardless_of_order() {
    use fixtures::*;

    let near = sphere(-5.0, Color::red());
    let far = sphere(-10.0, Color::blue());

    let mut w = World::empty();
    w.shapes = vec![far.clone(), near.clone()];
    let hit = w.nearest_hit(&forward_ray()).unwrap();
    assert_eq!(hit.color, Color::red());
    assert_eq!(hit.shape, 1);
    assert_eq!(hit.point, crate::tuple::Point3D::point(0.0, 0.0, -4.0));

    w.shapes = vec![near, far];
    let hit = w.nearest_hit(&forward_ray()).unwrap();
    assert_eq!(hit.color, Color::red());
    assert_eq!(hit.shape, 0);
    assert!(crate::feq(hit.distance, 4.0));
}

#[test]
fn nearest_hit_tie_keeps_first_shape() {
    use fixtures::*;

    let mut w = World::empty();
    w.shapes = vec![sphere(-5.0, Color::green()), sphere(-5.0, Color::red())];

    let hit = w.nearest_hit(&forward_ray()).unwrap();
    assert_eq!(hit.shape, 0);
    assert_eq!(hit.color, Color::green());
}

#[test]
fn nearest_hit_ignores_shapes_behind_origin() {
    use fixtures::*;

    let mut w = World::empty();
    w.shapes = vec![sphere(5.0, Color::red())];
    assert!(w.nearest_hit(&forward_ray()).is_none());

    w.shapes.push(sphere(-5.0, Color::blue()));
    assert_eq!(w.nearest_hit(&forward_ray()).unwrap().shape, 1);
}

#[test]
fn occluded_light_contributes_nothing() {
    use fixtures::*;
    use crate::tuple::Point3D;

    let mut w = World::empty();
    w.shapes = vec![
        Shape::plane(Point3D::point(0.0, -3.0, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
        sphere(-5.0, Color::red()),
    ];
    w.lights = vec![Light::point(Point3D::point(0.0, 10.0, -5.0),
        Color::white(), 1.0)];

    // The floor point right under the sphere.
    let ray = Ray::new(Point3D::point(0.0, 5.0, 0.0),
        Point3D::point(0.0, -3.0, -5.0) - Point3D::point(0.0, 5.0, 0.0));
    let hit = w.nearest_hit(&ray).unwrap();
    assert_eq!(hit.shape, 0);
    assert!(w.is_shadowed(&hit, &w.lights[0]));
    assert_eq!(w.shade_hit(&hit, ray.direction), Color::default());

    // Without the blocker the same point is lit.
    w.shapes.truncate(1);
    let hit = w.nearest_hit(&ray).unwrap();
    assert!(!w.is_shadowed(&hit, &w.lights[0]));
    assert!(w.shade_hit(&hit, ray.direction).r > 0.0);
}

#[test]
fn blocker_beyond_light_casts_no_shadow() {
    use fixtures::*;
    use crate::tuple::Point3D;

    let mut w = World::empty();
    w.shapes = vec![
        Shape::plane(Point3D::point(0.0, -3.0, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
        Shape::sphere(Point3D::point(0.0, 20.0, -5.0), 1.0),
    ];
    w.lights = vec![Light::point(Point3D::point(0.0, 10.0, -5.0),
        Color::white(), 1.0)];

    let ray = Ray::new(Point3D::point(0.0, 5.0, 0.0),
        Point3D::point(0.0, -3.0, -5.0) - Point3D::point(0.0, 5.0, 0.0));
    let hit = w.nearest_hit(&ray).unwrap();
    assert!(!w.is_shadowed(&hit, &w.lights[0]));
}

#[test]
fn shaded_shape_never_shadows_itself() {
    use fixtures::*;
    use crate::tuple::Point3D;

    // The light sits inside the sphere, so the shadow ray towards it would
    // cross the sphere's own surface.
    let mut w = World::empty();
    w.shapes = vec![sphere(-5.0, Color::white())];
    w.lights = vec![Light::point(Point3D::point(0.0, 0.0, -5.0),
        Color::white(), 1.0)];

    let hit = w.nearest_hit(&forward_ray()).unwrap();
    assert!(!w.is_shadowed(&hit, &w.lights[0]));
}

#[test]
fn shadow_distance_deducts_unit_length() {
    use crate::tuple::Point3D;

    // A blocker whose surface lies between 0.5 and 1 units short of the
    // light is ignored, because the distance to the light is shortened by
    // the length of the unit light direction.
    let mut w = World::empty();
    w.shapes = vec![
        Shape::plane(Point3D::point(0.0, 0.0, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
        Shape::plane(Point3D::point(0.0, 9.5, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
    ];
    let light = Light::point(Point3D::point(0.0, 10.0, 0.0),
        Color::white(), 1.0);
    let hit = Hit {
        distance: 1.0,
        color: Color::white(),
        point: Point3D::point(0.0, 0.0, 0.0),
        shape: 0,
    };
    assert!(!w.is_shadowed(&hit, &light));

    w.shapes[1] = Shape::plane(Point3D::point(0.0, 8.5, 0.0),
        Vector3D::vector(0.0, 1.0, 0.0));
    assert!(w.is_shadowed(&hit, &light));
}

#[test]
fn directional_light_is_blocked_at_any_distance() {
    use fixtures::*;
    use crate::tuple::Point3D;

    let mut w = World::empty();
    w.shapes = vec![
        Shape::plane(Point3D::point(0.0, -3.0, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
        sphere(-5.0, Color::red()),
    ];
    w.lights = vec![Light::directional(Vector3D::vector(0.0, -1.0, 0.0),
        Color::white(), 1.0)];

    let hit = Hit {
        distance: 1.0,
        color: Color::white(),
        point: Point3D::point(0.0, -3.0, -5.0),
        shape: 0,
    };
    assert!(w.is_shadowed(&hit, &w.lights[0]));
}
