// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
mod bounds;
mod transform;

pub use bounds::Bounds3f;
pub use ray::{Ray, RAY_EPSILON};
pub use transform::Transform;
