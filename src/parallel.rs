use log::{ debug, info };
use rayon::prelude::*;

use crate::color::Color;
use crate::canvas::Canvas;
use crate::scene::Scene;
use crate::error::Result;

/// Renders a scene on a pool of worker threads, one row per task.
///
/// `threads` is the size of the pool; zero lets rayon pick one thread per
/// logical CPU. Every pixel is independent of the others, so the result is
/// the same canvas `Scene::render` produces.
pub fn render_parallel(scene: &Scene, lit: bool, threads: usize)
    -> Result<Canvas> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    info!("rendering {}x{} pixels on {} threads",
        scene.width, scene.height, pool.current_num_threads());

    let mut pixels = vec![Color::default(); scene.width * scene.height];
    pool.install(|| {
        // max(1) keeps the chunk size valid for an empty canvas, which has
        // no rows to hand out anyway.
        pixels.par_chunks_mut(scene.width.max(1))
            .enumerate()
            .for_each(|(y, row)| {
                scene.render_row(y, lit, row);
                debug!("row {} done", y);
            });
    });

    info!("...done");
    Ok(Canvas::from_pixels(scene.width, scene.height, pixels)
        .unwrap_or_else(|| Canvas::new(scene.width, scene.height)))
}

#[cfg(test)]
fn test_scene() -> Scene {
    use crate::tuple::{ Point3D, Vector3D };
    use crate::shape::{ Shape, Material };
    use crate::light::Light;
    use crate::world::World;
    use crate::camera::Camera;

    let mut world = World::empty();
    world.ambient = Color::rgba(0.2, 0.2, 0.2, 1.0);
    world.shapes = vec![
        Shape::plane(Point3D::point(0.0, -1.0, 0.0),
            Vector3D::vector(0.0, 1.0, 0.0)),
        Shape::sphere(Point3D::point(0.0, 0.0, -5.0), 1.0)
            .with_material(Material::new(Color::rgb(50.0, 200.0, 100.0), 16.0)),
    ];
    world.lights = vec![Light::point(Point3D::point(-3.0, 5.0, 0.0),
        Color::white(), 1.0)];

    Scene::new(world, Camera::default(), 24, 16, 60.0)
}

#[test]
fn parallel_render_matches_serial_render() {
    let scene = test_scene();

    for &lit in [false, true].iter() {
        let serial = scene.render(lit);
        assert_eq!(render_parallel(&scene, lit, 4).unwrap(), serial);
        assert_eq!(render_parallel(&scene, lit, 1).unwrap(), serial);
    }
}

#[test]
fn parallel_render_with_default_pool() {
    let scene = test_scene();
    let canvas = render_parallel(&scene, true, 0).unwrap();

    assert_eq!(canvas.width, 24);
    assert_eq!(canvas.height, 16);
    assert_eq!(canvas.pixels().len(), 24 * 16);
}
