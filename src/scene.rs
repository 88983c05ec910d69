use std::convert::TryFrom;
use std::fs::File;
use std::io::{ BufReader, Read };
use std::path::Path;

use log::{ debug, info };
use serde::{ Serialize, Deserialize };

use crate::consts::DEFAULT_FIELD_OF_VIEW;
use crate::error::{ Error, Result };
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::ray::Ray;
use crate::shape::{ Shape, Material };
use crate::light::Light;
use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;

/// Everything needed to produce a frame: the world, the camera looking at
/// it, and the output dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
    pub width: usize,
    pub height: usize,

    /// The vertical field of view, in degrees.
    pub field_of_view: f64,
}

impl Scene {
    pub fn new(world: World, camera: Camera, width: usize, height: usize,
        field_of_view: f64) -> Scene {
        Scene { world, camera, width, height, field_of_view }
    }

    /// Loads a scene from a JSON description file.
    pub fn load(path: &Path) -> Result<Scene> {
        debug!("loading scene from {}", path.display());
        Scene::from_reader(BufReader::new(File::open(path)?))
    }

    /// Reads a scene from a JSON description.
    pub fn from_reader<R: Read>(reader: R) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_reader(reader)?;
        let scene = Scene::try_from(scene_json)?;

        debug!("scene has {} shapes and {} lights, {}x{} pixels",
            scene.world.shapes.len(), scene.world.lights.len(),
            scene.width, scene.height);
        Ok(scene)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// The primary ray through the center of a pixel.
    ///
    /// Pixel `(0, 0)` is the top left corner of the image.
    pub fn pixel_ray(&self, x: usize, y: usize) -> Ray {
        let u = (x as f64 + 0.5) / self.width as f64;
        let v = 1.0 - (y as f64 + 0.5) / self.height as f64;

        self.camera.ray(u, v, self.field_of_view, self.aspect_ratio())
    }

    /// Traces every pixel of row `y` into `row`.
    pub fn render_row(&self, y: usize, lit: bool, row: &mut [Color]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = self.pixel_ray(x, y);
            *pixel = self.camera.trace_ray(&ray, &self.world, lit);
        }
    }

    /// Renders the scene on the current thread.
    ///
    /// When `lit` is false, surfaces are drawn with their flat color.
    pub fn render(&self, lit: bool) -> Canvas {
        info!("rendering {}x{} pixels on one thread", self.width, self.height);

        let mut pixels = vec![Color::default(); self.width * self.height];
        for (y, row) in pixels.chunks_mut(self.width.max(1)).enumerate() {
            self.render_row(y, lit, row);
        }

        info!("...done");
        Canvas::from_pixels(self.width, self.height, pixels)
            .unwrap_or_else(|| Canvas::new(self.width, self.height))
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = Error;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        if scene_json.width == 0 || scene_json.height == 0 {
            return Err(Error::EmptyCanvas {
                width: scene_json.width,
                height: scene_json.height,
            });
        }

        // Create the camera, refusing a basis which can't produce rays.
        let camera_json = &scene_json.camera;
        let camera = Camera::new(
            to_tuple("camera.origin", &camera_json.origin)?,
            to_tuple("camera.direction", &camera_json.direction)?,
            to_tuple("camera.up", &camera_json.up)?,
        );
        if !camera.has_valid_basis() {
            return Err(Error::DegenerateCamera);
        }

        // Create the world.
        let mut world = World::empty();
        world.ambient = match scene_json.ambient {
            Some(ref ambient) => to_color("ambient", ambient, 1.0)?,
            None => Color::default(),
        };

        world.shapes = scene_json.shapes.iter()
            .enumerate()
            .map(|(index, shape_json)| shape_json.to_shape(index))
            .collect::<Result<_>>()?;

        world.lights = scene_json.lights.iter()
            .enumerate()
            .map(|(index, light_json)| light_json.to_light(index))
            .collect::<Result<_>>()?;

        Ok(Scene::new(world, camera, scene_json.width, scene_json.height,
            camera_json.field_of_view))
    }
}

/// Converts a JSON array into a tuple.
fn to_tuple(field: &'static str, v: &[f64]) -> Result<Tuple3D> {
    match *v {
        [x, y, z] => Ok(Tuple3D::new(x, y, z)),
        _ => Err(Error::InvalidVector { field, len: v.len() }),
    }
}

/// Converts a JSON array into a color. Three channels take `alpha` as their
/// alpha value.
fn to_color(field: &'static str, v: &[f64], alpha: f64) -> Result<Color> {
    match *v {
        [r, g, b] => Ok(Color::rgba(r, g, b, alpha)),
        [r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
        _ => Err(Error::InvalidColor { field, len: v.len() }),
    }
}

fn default_field_of_view() -> f64 {
    DEFAULT_FIELD_OF_VIEW
}

fn default_color() -> Vec<f64> {
    vec![255.0, 255.0, 255.0]
}

fn default_intensity() -> f64 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    width: usize,
    height: usize,
    camera: CameraJson,

    #[serde(default)]
    ambient: Option<Vec<f64>>,

    #[serde(default)]
    shapes: Vec<ShapeJson>,

    #[serde(default)]
    lights: Vec<LightJson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct CameraJson {
    origin: Vec<f64>,
    direction: Vec<f64>,
    up: Vec<f64>,

    #[serde(default = "default_field_of_view")]
    field_of_view: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ShapeJson {
    #[serde(flatten)]
    ty: ShapeTypeJson,

    #[serde(default = "default_color")]
    color: Vec<f64>,

    #[serde(default)]
    shininess: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeTypeJson {
    Sphere {
        center: Vec<f64>,
        radius: f64,
    },
    Plane {
        point: Vec<f64>,
        normal: Vec<f64>,
    },
    Cylinder {
        center: Vec<f64>,
        radius: f64,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
        #[serde(default)]
        closed: bool,
    },
    Cone {
        apex: Vec<f64>,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
        #[serde(default)]
        closed: bool,
    },
}

impl ShapeJson {
    fn to_shape(&self, index: usize) -> Result<Shape> {
        let invalid = |reason: &'static str| Error::InvalidShape { index, reason };
        let bounds = |minimum: Option<f64>, maximum: Option<f64>| {
            let minimum = minimum.unwrap_or(-f64::INFINITY);
            let maximum = maximum.unwrap_or(f64::INFINITY);
            if minimum < maximum {
                Ok((minimum, maximum))
            } else {
                Err(invalid("minimum must be below maximum"))
            }
        };

        let shape = match self.ty {
            ShapeTypeJson::Sphere { ref center, radius } => {
                if !(radius > 0.0) {
                    return Err(invalid("radius must be positive"));
                }
                Shape::sphere(to_tuple("sphere.center", center)?, radius)
            },
            ShapeTypeJson::Plane { ref point, ref normal } => {
                let normal = to_tuple("plane.normal", normal)?;
                if normal.magnitude() == 0.0 {
                    return Err(invalid("normal must not be zero"));
                }
                Shape::plane(to_tuple("plane.point", point)?, normal)
            },
            ShapeTypeJson::Cylinder { ref center, radius, minimum, maximum,
                closed } => {
                if !(radius > 0.0) {
                    return Err(invalid("radius must be positive"));
                }
                let (minimum, maximum) = bounds(minimum, maximum)?;
                Shape::bounded_cylinder(to_tuple("cylinder.center", center)?,
                    radius, minimum, maximum, closed)
            },
            ShapeTypeJson::Cone { ref apex, minimum, maximum, closed } => {
                let (minimum, maximum) = bounds(minimum, maximum)?;
                Shape::bounded_cone(to_tuple("cone.apex", apex)?,
                    minimum, maximum, closed)
            },
        };

        let material = Material::new(
            to_color("shape.color", &self.color, 255.0)?,
            self.shininess,
        );
        Ok(shape.with_material(material))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LightJson {
    Point {
        position: Vec<f64>,
        #[serde(default = "default_color")]
        color: Vec<f64>,
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
    Directional {
        direction: Vec<f64>,
        #[serde(default = "default_color")]
        color: Vec<f64>,
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
}

impl LightJson {
    fn to_light(&self, index: usize) -> Result<Light> {
        match *self {
            LightJson::Point { ref position, color: ref c, intensity } => {
                Ok(Light::point(to_tuple("light.position", position)?,
                    to_color("light.color", c, 255.0)?, intensity))
            },
            LightJson::Directional { ref direction, color: ref c,
                intensity } => {
                let direction = to_tuple("light.direction", direction)?;
                if direction.magnitude() == 0.0 {
                    return Err(Error::InvalidLight {
                        index,
                        reason: "direction must not be zero",
                    });
                }
                Ok(Light::directional(direction,
                    to_color("light.color", c, 255.0)?, intensity))
            },
        }
    }
}

#[cfg(test)]
const SPHERE_SCENE: &str = r#"{
    "width": 40,
    "height": 30,
    "camera": {
        "origin": [0, 0, 0],
        "direction": [0, 0, -1],
        "up": [0, 1, 0],
        "field_of_view": 60
    },
    "ambient": [0.1, 0.1, 0.1],
    "shapes": [
        { "type": "sphere", "center": [0, 0, -5], "radius": 1,
          "color": [255, 0, 0], "shininess": 32 },
        { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0],
          "color": [128, 128, 128, 255] },
        { "type": "cylinder", "center": [3, 0, -8], "radius": 0.5,
          "minimum": -1, "maximum": 1, "closed": true },
        { "type": "cone", "apex": [-3, 1, -8], "minimum": -1, "maximum": 0 }
    ],
    "lights": [
        { "type": "point", "position": [0, 5, 0], "intensity": 0.8 },
        { "type": "directional", "direction": [0, -1, -1],
          "color": [255, 240, 200] }
    ]
}"#;

#[cfg(test)]
fn with_field(field: &str, value: serde_json::Value) -> String {
    let mut json: serde_json::Value = serde_json::from_str(SPHERE_SCENE).unwrap();
    json[field] = value;
    json.to_string()
}

#[test]
fn load_scene_description() {
    use crate::tuple::{ Point3D, Vector3D };
    use crate::shape::ShapeType;

    let scene = Scene::from_reader(SPHERE_SCENE.as_bytes()).unwrap();

    assert_eq!(scene.width, 40);
    assert_eq!(scene.height, 30);
    assert_eq!(scene.field_of_view, 60.0);
    assert_eq!(scene.camera, Camera::default());
    assert_eq!(scene.world.ambient, Color::rgba(0.1, 0.1, 0.1, 1.0));

    assert_eq!(scene.world.shapes.len(), 4);
    assert_eq!(scene.world.shapes[0],
        Shape::sphere(Point3D::point(0.0, 0.0, -5.0), 1.0)
            .with_material(Material::new(Color::red(), 32.0)));
    assert_eq!(scene.world.shapes[1].material,
        Material::new(Color::rgb(128.0, 128.0, 128.0), 0.0));
    assert_eq!(scene.world.shapes[2].ty, ShapeType::Cylinder {
        center: Point3D::point(3.0, 0.0, -8.0),
        radius: 0.5,
        minimum: -1.0,
        maximum: 1.0,
        closed: true,
    });
    assert_eq!(scene.world.shapes[3].material, Material::default());

    assert_eq!(scene.world.lights, vec![
        Light::point(Point3D::point(0.0, 5.0, 0.0), Color::white(), 0.8),
        Light::directional(Vector3D::vector(0.0, -1.0, -1.0),
            Color::rgb(255.0, 240.0, 200.0), 1.0),
    ]);
}

#[test]
fn unbounded_shapes_default_to_infinite_extent() {
    let json = with_field("shapes", serde_json::json!([
        { "type": "cone", "apex": [0, 0, -5] }
    ]));
    let scene = Scene::from_reader(json.as_bytes()).unwrap();

    assert_eq!(scene.world.shapes[0],
        Shape::cone(crate::tuple::Point3D::point(0.0, 0.0, -5.0)));
}

#[test]
fn missing_field_of_view_uses_default() {
    let json = with_field("camera", serde_json::json!({
        "origin": [0, 0, 0], "direction": [1, 0, 0], "up": [0, 0, 1]
    }));
    let scene = Scene::from_reader(json.as_bytes()).unwrap();

    assert_eq!(scene.field_of_view, DEFAULT_FIELD_OF_VIEW);
}

#[test]
fn reject_degenerate_camera() {
    let json = with_field("camera", serde_json::json!({
        "origin": [0, 0, 0], "direction": [0, 2, 0], "up": [0, 1, 0]
    }));

    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::DegenerateCamera)));
}

#[test]
fn reject_empty_canvas() {
    let json = with_field("width", serde_json::json!(0));

    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::EmptyCanvas { width: 0, height: 30 })));
}

#[test]
fn reject_bad_arrays() {
    let json = with_field("ambient", serde_json::json!([1, 1]));
    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidColor { field: "ambient", len: 2 })));

    let json = with_field("shapes", serde_json::json!([
        { "type": "sphere", "center": [0, 0], "radius": 1 }
    ]));
    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidVector { field: "sphere.center", len: 2 })));
}

#[test]
fn reject_invalid_shapes() {
    let json = with_field("shapes", serde_json::json!([
        { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
        { "type": "sphere", "center": [0, 0, 0], "radius": -1 }
    ]));
    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidShape { index: 1, .. })));

    let json = with_field("shapes", serde_json::json!([
        { "type": "plane", "point": [0, 0, 0], "normal": [0, 0, 0] }
    ]));
    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidShape { index: 0, .. })));

    let json = with_field("shapes", serde_json::json!([
        { "type": "cylinder", "center": [0, 0, 0], "radius": 1,
          "minimum": 2, "maximum": 1 }
    ]));
    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidShape { index: 0, .. })));
}

#[test]
fn reject_unknown_shape_type() {
    let json = with_field("shapes", serde_json::json!([
        { "type": "torus", "center": [0, 0, 0] }
    ]));

    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::Json(_))));
}

#[test]
fn reject_zero_light_direction() {
    let json = with_field("lights", serde_json::json!([
        { "type": "directional", "direction": [0, 0, 0] }
    ]));

    assert!(matches!(Scene::from_reader(json.as_bytes()),
        Err(Error::InvalidLight { index: 0, .. })));
}

#[test]
fn pixel_rays_cover_the_image() {
    let scene = Scene::from_reader(SPHERE_SCENE.as_bytes()).unwrap();

    // Top rows look up, left and right columns look to opposite sides.
    assert!(scene.pixel_ray(20, 0).direction.y > 0.0);
    assert!(scene.pixel_ray(20, 29).direction.y < 0.0);
    assert!(scene.pixel_ray(0, 15).direction.x
        * scene.pixel_ray(39, 15).direction.x < 0.0);
    assert!(crate::feq(scene.aspect_ratio(), 4.0 / 3.0));
}

#[test]
fn render_centre_pixel_sees_sphere() {
    let scene = Scene::from_reader(SPHERE_SCENE.as_bytes()).unwrap();

    let flat = scene.render(false);
    assert_eq!(flat.width, 40);
    assert_eq!(flat.height, 30);
    assert_eq!(flat.read_pixel(20, 15).unwrap(), Color::red());

    let lit = scene.render(true);
    let centre = lit.read_pixel(20, 15).unwrap();
    assert!(centre.r > 0.0 && centre.r <= 255.0);
    assert_eq!(lit.read_pixel(20, 0).unwrap(), Color::default());
}
