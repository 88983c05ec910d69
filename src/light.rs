use crate::consts::COLOR_MAX;
use crate::color::Color;
use crate::tuple::{ Point3D, Vector3D };

/// A light source.
///
/// Both kinds answer the same three queries: which way light travels to reach
/// a point, how far away the light is, and what color arrives there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Light {
    /// Light radiating in every direction from a single position.
    Point {
        position: Point3D,
        color: Color,
        intensity: f64,
    },

    /// Light arriving everywhere from the same direction, from infinitely
    /// far away. `direction` is the way the light travels, and is kept
    /// normalized.
    Directional {
        direction: Vector3D,
        color: Color,
        intensity: f64,
    },
}

impl Light {
    pub fn point(position: Point3D, color: Color, intensity: f64) -> Light {
        Light::Point { position, color, intensity }
    }

    pub fn directional(direction: Vector3D, color: Color, intensity: f64)
        -> Light {
        Light::Directional {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// The direction light travels from the source to `point`.
    ///
    /// Not necessarily unit length for point lights.
    pub fn direction_to_point(&self, point: Point3D) -> Vector3D {
        match *self {
            Light::Point { position, .. } => point - position,
            Light::Directional { direction, .. } => direction,
        }
    }

    /// The distance from the source to `point`.
    pub fn distance(&self, point: Point3D) -> f64 {
        match *self {
            Light::Point { position, .. } => (point - position).magnitude(),
            Light::Directional { .. } => f64::INFINITY,
        }
    }

    /// The light color arriving at `point`. Light does not attenuate.
    pub fn intensity_at(&self, _point: Point3D) -> Color {
        match *self {
            Light::Point { color, intensity, .. } => color * intensity,
            Light::Directional { color, intensity, .. } => color * intensity,
        }
    }
}

/// Computes the Lambertian term for one light.
///
/// `dot` is the cosine between the light direction and the normal, already
/// clamped to be non-negative. The product of the two colors is brought back
/// to display units by dividing by 255. Only the color channels are written;
/// alpha is left at `base.a`.
pub fn diffuse(base: Color, surface: Color, light: Color, dot: f64) -> Color {
    Color {
        r: surface.r * light.r * dot / COLOR_MAX,
        g: surface.g * light.g * dot / COLOR_MAX,
        b: surface.b * light.b * dot / COLOR_MAX,
        a: base.a,
    }
}

/// Computes the specular highlight for one light.
///
/// The light direction is mirrored about the normal using the (clamped)
/// cosine `dot`, and the highlight falls off with the `shininess` power of the
/// cosine between the view direction and that reflection. A shininess of
/// zero disables the highlight and yields a zero color.
pub fn specular(light: Color, dot: f64, view_dir: Vector3D,
    light_dir: Vector3D, normal: Vector3D, shininess: f64) -> Color {
    if shininess == 0.0 {
        return Color::default();
    }

    let reflect_dir = (normal * (2.0 * dot) - light_dir).normalize();
    let factor = view_dir.dot(&reflect_dir).max(0.0).powf(shininess);

    light * factor
}

/// Calculates one light's contribution at a shaded point.
///
/// `light_dir` must point from the light to the point, and `normal` must
/// face the light side of the surface (the outward normal negated). Both are
/// unit vectors, as is `view_dir`.
pub fn lighting(surface: Color, shininess: f64, light_color: Color,
    light_dir: Vector3D, normal: Vector3D, view_dir: Vector3D) -> Color {
    let mut color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    let dot = light_dir.dot(&normal).max(0.0);
    if dot > 0.0 {
        color = diffuse(color, surface, light_color, dot);
    }

    color + specular(light_color, dot, view_dir, light_dir, normal, shininess)
}

#[test]
fn point_light_queries() {
    let light = Light::point(
        Point3D::point(0.0, 10.0, 0.0),
        Color::white(),
        0.5,
    );
    let p = Point3D::point(0.0, 0.0, 0.0);

    assert_eq!(light.direction_to_point(p), Vector3D::vector(0.0, -10.0, 0.0));
    assert_eq!(light.distance(p), 10.0);
    assert_eq!(light.intensity_at(p), Color::rgba(127.5, 127.5, 127.5, 127.5));
}

#[test]
fn directional_light_queries() {
    let light = Light::directional(
        Vector3D::vector(0.0, -2.0, 0.0),
        Color::rgb(10.0, 20.0, 30.0),
        1.0,
    );
    let p = Point3D::point(4.0, 5.0, 6.0);

    assert_eq!(light.direction_to_point(p), Vector3D::vector(0.0, -1.0, 0.0));
    assert!(light.distance(p).is_infinite());
    assert_eq!(light.intensity_at(p), Color::rgb(10.0, 20.0, 30.0));
}

#[test]
fn diffuse_is_normalized_lambert() {
    let base = Color::rgba(0.0, 0.0, 0.0, 1.0);
    let c = diffuse(base, Color::rgb(255.0, 128.0, 0.0), Color::white(), 0.5);

    assert_eq!(c, Color::rgba(127.5, 64.0, 0.0, 1.0));
}

#[test]
fn specular_is_zero_without_shininess() {
    let n = Vector3D::vector(0.0, 0.0, -1.0);

    // The eye sits exactly on the reflection, which would otherwise give the
    // strongest possible highlight.
    let c = specular(Color::white(), 1.0, n, -n, n, 0.0);
    assert_eq!(c, Color::default());
}

#[test]
fn specular_peaks_on_reflection() {
    let n = Vector3D::vector(0.0, 1.0, 0.0);
    let l = Vector3D::vector(0.0, 1.0, 0.0);

    // Mirrored about the normal, a light travelling along the normal comes
    // straight back along it.
    let c = specular(Color::white(), 1.0, n, l, n, 16.0);
    assert_eq!(c, Color::white());

    let away = specular(Color::white(), 1.0, -n, l, n, 16.0);
    assert_eq!(away, Color::default());
}

#[test]
fn lighting_facing_away_has_no_diffuse() {
    let n = Vector3D::vector(0.0, 1.0, 0.0);
    let l = Vector3D::vector(0.0, -1.0, 0.0);
    let v = Vector3D::vector(0.0, 0.0, 1.0);

    let c = lighting(Color::white(), 0.0, Color::white(), l, n, v);
    assert_eq!(c, Color::rgba(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn lighting_head_on() {
    let n = Vector3D::vector(0.0, 0.0, 1.0);
    let l = Vector3D::vector(0.0, 0.0, 1.0);
    let v = Vector3D::vector(1.0, 0.0, 0.0);

    let c = lighting(Color::rgb(100.0, 50.0, 25.0), 0.0,
        Color::white(), l, n, v);
    assert_eq!(c, Color::rgba(100.0, 50.0, 25.0, 1.0));
}
