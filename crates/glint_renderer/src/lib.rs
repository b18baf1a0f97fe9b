//! Glint renderer - Whitted-style CPU ray tracing
//!
//! Shapes (spheres, mesh triangles) are wrapped with materials into
//! primitives, collected by a list or BVH aggregate, and shaded by a
//! recursive integrator with shadow rays and mirror reflection.

mod bucket;
mod bvh;
mod camera;
mod integrator;
mod light;
mod primitive;
mod renderer;
mod scene;
mod shape;
mod sphere;
mod surfel;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{BvhAccel, BvhNode};
pub use camera::{Camera, Projection};
pub use integrator::{Integrator, WhittedIntegrator, DEFAULT_MAX_DEPTH};
pub use light::{Light, LightSample, VisibilityTester};
pub use primitive::{Accelerator, GeometricPrimitive, PrimList, Primitive};
pub use renderer::{render, render_pixel, FilmError, ImageBuffer, RenderConfig};
pub use scene::{Background, Scene, SceneBuilder, SceneError};
pub use shape::Shape;
pub use sphere::Sphere;
pub use surfel::Surfel;
pub use triangle::Triangle;

/// Re-export the math and core types used in the public API
pub use glint_core::{Color, Material, MeshError, MeshOptions, TriangleMesh};
pub use glint_math::{Bounds3f, Ray, Transform, Vec3};
