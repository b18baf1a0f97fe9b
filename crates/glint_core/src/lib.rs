//! Glint Core - scene data shared by the renderer.
//!
//! This crate provides:
//!
//! - **Geometry data**: `TriangleMesh`, an indexed triangle database shared by
//!   every triangle cut from it
//! - **Mesh loading**: Wavefront OBJ files through `tobj`
//! - **Shading data**: `Material` coefficients and the saturating `Color`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_obj, MeshOptions};
//!
//! let mesh = load_obj("bunny.obj", &MeshOptions::default())?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod color;
pub mod loader;
pub mod material;
pub mod mesh;

// Re-export commonly used types
pub use color::Color;
pub use loader::load_obj;
pub use material::Material;
pub use mesh::{MeshError, MeshOptions, MeshResult, TriangleMesh};
