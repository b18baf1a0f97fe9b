//! Immutable scene and the builder that assembles it.

use crate::light::Light;
use crate::primitive::{Accelerator, GeometricPrimitive, Primitive};
use crate::shape::Shape;
use crate::sphere::Sphere;
use crate::surfel::Surfel;
use crate::triangle::Triangle;
use glint_core::{load_obj, Color, Material, MeshError, MeshOptions, TriangleMesh};
use glint_math::{Bounds3f, Ray, Transform, Vec3};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("scene contains no geometry")]
    NoGeometry,

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Color seen by primary rays that miss every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Bilinear blend of four corner colors.
    Corners {
        bottom_left: Color,
        top_left: Color,
        top_right: Color,
        bottom_right: Color,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::BLACK)
    }
}

impl Background {
    /// Sample at normalized screen coordinates; `(0, 0)` is the top-left
    /// corner, `(1, 1)` the bottom-right.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Corners {
                bottom_left,
                top_left,
                top_right,
                bottom_right,
            } => {
                let u = u.clamp(0.0, 1.0);
                let v = v.clamp(0.0, 1.0);
                let top = top_left.lerp(top_right, u);
                let bottom = bottom_left.lerp(bottom_right, u);
                top.lerp(bottom, v)
            }
        }
    }
}

/// Read-only scene handed to integrators.
#[derive(Debug, Clone)]
pub struct Scene {
    aggregate: Primitive,
    lights: Vec<Light>,
    background: Background,
}

impl Scene {
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Option<Surfel<'a>> {
        self.aggregate.intersect(ray)
    }

    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        self.aggregate.intersect_p(ray, max_t)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn world_bounds(&self) -> Bounds3f {
        self.aggregate.bounds()
    }
}

/// Collects shapes, materials and lights, then freezes them into a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    background: Background,
    accelerator: Accelerator,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: impl Into<Shape>, material: &Arc<Material>) -> &mut Self {
        self.primitives
            .push(GeometricPrimitive::new(shape, Arc::clone(material)).into());
        self
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: &Arc<Material>) -> &mut Self {
        self.add_shape(Sphere::new(center, radius), material)
    }

    pub fn add_transformed_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        object_to_world: Arc<Transform>,
        material: &Arc<Material>,
    ) -> &mut Self {
        self.add_shape(Sphere::with_transform(center, radius, object_to_world), material)
    }

    /// Add every triangle of `mesh`, all sharing `material`.
    pub fn add_mesh(&mut self, mesh: TriangleMesh, material: &Arc<Material>) -> &mut Self {
        let mesh = Arc::new(mesh);
        log::debug!(
            "Adding mesh with {} triangles ({} material)",
            mesh.triangle_count(),
            material.name
        );
        for triangle in Triangle::from_mesh(&mesh) {
            self.add_shape(triangle, material);
        }
        self
    }

    /// Load an OBJ file and add its triangles.
    pub fn add_obj<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &MeshOptions,
        material: &Arc<Material>,
    ) -> Result<&mut Self, SceneError> {
        let mesh = load_obj(path, options)?;
        Ok(self.add_mesh(mesh, material))
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }

    pub fn set_background(&mut self, background: Background) -> &mut Self {
        self.background = background;
        self
    }

    pub fn set_accelerator(&mut self, accelerator: Accelerator) -> &mut Self {
        self.accelerator = accelerator;
        self
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Freeze the collected data. Fails if there is nothing to render.
    pub fn build(self) -> Result<Scene, SceneError> {
        if self.primitives.is_empty() {
            return Err(SceneError::NoGeometry);
        }

        let count = self.primitives.len();
        let aggregate = self.accelerator.build(self.primitives);
        let world = aggregate.bounds();

        let mut lights = self.lights;
        for light in &mut lights {
            light.fit_to_world(&world);
        }

        log::info!(
            "Scene ready: {} primitives ({}), {} lights",
            count,
            self.accelerator,
            lights.len()
        );

        Ok(Scene {
            aggregate,
            lights,
            background: self.background,
        })
    }
}
