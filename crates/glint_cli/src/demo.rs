//! Built-in demo scene.

use anyhow::{Context, Result};
use glint_core::{Color, Material, MeshOptions, TriangleMesh};
use glint_math::{Transform, Vec3};
use glint_renderer::{Accelerator, Background, Light, Scene, SceneBuilder};
use std::path::Path;
use std::sync::Arc;

/// Floor, a mirror sphere and a squashed glossy sphere, lit by ambient,
/// point and spot lights. An optional OBJ mesh is dropped onto the floor.
pub fn build(accelerator: Accelerator, mesh: Option<(&Path, MeshOptions)>) -> Result<Scene> {
    let floor = Arc::new(Material::blinn_phong(
        "floor",
        Color::gray(0.1),
        Color::new(0.55, 0.55, 0.5),
        Color::BLACK,
        Color::gray(0.15),
        0.0,
    ));
    let mirror = Arc::new(Material::blinn_phong(
        "mirror",
        Color::gray(0.02),
        Color::gray(0.1),
        Color::WHITE,
        Color::gray(0.85),
        128.0,
    ));
    let plastic = Arc::new(Material::blinn_phong(
        "plastic",
        Color::new(0.05, 0.02, 0.0),
        Color::new(0.9, 0.45, 0.1),
        Color::gray(0.6),
        Color::BLACK,
        24.0,
    ));

    let mut builder = SceneBuilder::new();
    builder
        .set_accelerator(accelerator)
        .set_background(Background::Corners {
            bottom_left: Color::new(0.85, 0.85, 0.95),
            top_left: Color::new(0.25, 0.4, 0.8),
            top_right: Color::new(0.3, 0.45, 0.85),
            bottom_right: Color::new(0.9, 0.9, 0.95),
        })
        .add_mesh(ground_plane(25.0)?, &floor)
        .add_sphere(Vec3::new(-1.3, 1.0, -0.5), 1.0, &mirror)
        .add_transformed_sphere(
            Vec3::ZERO,
            1.0,
            Arc::new(
                Transform::translate(Vec3::new(1.5, 0.5, 0.8))
                    .compose(&Transform::rotate_z(30.0))
                    .compose(&Transform::scale(0.9, 0.5, 0.7)),
            ),
            &plastic,
        )
        .add_light(Light::ambient(Color::gray(0.15)))
        .add_light(Light::point(Color::gray(0.5), Vec3::new(-5.0, 7.0, 5.0)))
        .add_light(Light::spot(
            Color::gray(0.7),
            Vec3::new(4.0, 9.0, 3.0),
            Vec3::ZERO,
            30.0,
            18.0,
        ))
        .add_light(Light::directional(
            Color::gray(0.2),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::ZERO,
        ));

    if let Some((path, options)) = mesh {
        let material = Arc::new(Material::blinn_phong(
            "mesh",
            Color::gray(0.05),
            Color::new(0.3, 0.6, 0.35),
            Color::gray(0.3),
            Color::BLACK,
            16.0,
        ));
        builder
            .add_obj(path, &options, &material)
            .with_context(|| format!("loading mesh {}", path.display()))?;
    }

    Ok(builder.build()?)
}

/// Square ground plane at `y = 0` facing up.
fn ground_plane(half_size: f32) -> Result<TriangleMesh> {
    let h = half_size;
    let mesh = TriangleMesh::with_shared_indices(
        vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ],
        vec![Vec3::Y; 4],
        vec![0, 2, 1, 0, 3, 2],
    )?;
    Ok(mesh)
}
