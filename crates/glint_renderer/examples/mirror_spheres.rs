//! Mirror and glossy spheres over a matte floor, lit by a spot and a point light.
//!
//! Writes `mirror_spheres.png` to the working directory.

use glint_renderer::{
    render, Accelerator, Background, Camera, Color, Integrator, Light, Material, RenderConfig,
    SceneBuilder, Transform, TriangleMesh, Vec3, WhittedIntegrator,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let floor = Arc::new(Material::blinn_phong(
        "floor",
        Color::gray(0.1),
        Color::new(0.6, 0.6, 0.5),
        Color::BLACK,
        Color::BLACK,
        0.0,
    ));
    let chrome = Arc::new(Material::blinn_phong(
        "chrome",
        Color::gray(0.05),
        Color::gray(0.2),
        Color::WHITE,
        Color::gray(0.7),
        64.0,
    ));
    let red = Arc::new(Material::blinn_phong(
        "red",
        Color::new(0.1, 0.0, 0.0),
        Color::new(0.8, 0.1, 0.1),
        Color::gray(0.5),
        Color::BLACK,
        16.0,
    ));

    let floor_mesh = TriangleMesh::with_shared_indices(
        vec![
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(-20.0, 0.0, 20.0),
        ],
        vec![Vec3::Y; 4],
        vec![0, 2, 1, 0, 3, 2],
    )?;

    let mut builder = SceneBuilder::new();
    builder
        .set_accelerator(Accelerator::Bvh)
        .set_background(Background::Corners {
            bottom_left: Color::new(0.9, 0.9, 1.0),
            top_left: Color::new(0.3, 0.5, 0.9),
            top_right: Color::new(0.3, 0.5, 0.9),
            bottom_right: Color::new(0.9, 0.9, 1.0),
        })
        .add_mesh(floor_mesh, &floor)
        .add_sphere(Vec3::new(-1.2, 1.0, 0.0), 1.0, &chrome)
        .add_transformed_sphere(
            Vec3::ZERO,
            1.0,
            Arc::new(
                Transform::translate(Vec3::new(1.4, 0.6, 0.5))
                    .compose(&Transform::scale(0.6, 0.6, 0.6)),
            ),
            &red,
        )
        .add_light(Light::ambient(Color::gray(0.2)))
        .add_light(Light::point(Color::gray(0.6), Vec3::new(-4.0, 6.0, 4.0)))
        .add_light(Light::spot(
            Color::gray(0.8),
            Vec3::new(3.0, 8.0, 2.0),
            Vec3::new(0.0, 0.0, 0.0),
            35.0,
            20.0,
        ));
    let scene = builder.build()?;

    let camera = Camera::perspective(40.0, 640, 360).look_at(
        Vec3::new(0.0, 2.5, 8.0),
        Vec3::new(0.0, 0.8, 0.0),
        Vec3::Y,
    );
    let config = RenderConfig {
        integrator: Integrator::Whitted(WhittedIntegrator::new(5)),
        ..Default::default()
    };

    let image = render(&camera, &scene, &config);
    image.save_png("mirror_spheres.png")?;
    Ok(())
}
