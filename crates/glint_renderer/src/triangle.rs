//! Triangle shape referencing a shared indexed mesh.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::surfel::Surfel;
use glint_core::TriangleMesh;
use glint_math::{Bounds3f, Ray, Vec3};
use std::sync::Arc;

/// Determinant threshold below which the ray is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-8;

/// One triangle of a [`TriangleMesh`].
///
/// Vertex and normal indices are resolved once at construction; the mesh
/// itself is shared read-only by every triangle cut from it.
#[derive(Debug, Clone)]
pub struct Triangle {
    mesh: Arc<TriangleMesh>,
    vertices: [usize; 3],
    normals: [usize; 3],
}

/// Barycentric hit before any shading is done.
struct RawHit {
    t: f32,
    u: f32,
    v: f32,
}

impl Triangle {
    /// Create triangle `tri` of `mesh`.
    pub fn new(mesh: Arc<TriangleMesh>, tri: usize) -> Self {
        let vertices = mesh.vertex_triplet(tri);
        let normals = mesh.normal_triplet(tri);
        Self {
            mesh,
            vertices,
            normals,
        }
    }

    /// Cut every triangle out of `mesh`.
    pub fn from_mesh(mesh: &Arc<TriangleMesh>) -> Vec<Triangle> {
        (0..mesh.triangle_count())
            .map(|tri| Triangle::new(Arc::clone(mesh), tri))
            .collect()
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    fn position(&self, corner: usize) -> Vec3 {
        self.mesh.positions()[self.vertices[corner]]
    }

    fn normal(&self, corner: usize) -> Vec3 {
        self.mesh.normals()[self.normals[corner]]
    }

    /// Ray-plane solve with barycentric rejection; `t` must lie in
    /// `(ray.t_min, max_t)`.
    fn solve(&self, ray: &Ray, max_t: f32) -> Option<RawHit> {
        let v0 = self.position(0);
        let edge1 = self.position(1) - v0;
        let edge2 = self.position(2) - v0;

        let h = ray.direction.cross(edge2);
        let det = edge1.dot(h);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if t <= ray.t_min || t >= max_t {
            return None;
        }

        Some(RawHit { t, u, v })
    }

    /// Nearest hit with an interpolated normal; faces pointing along the ray
    /// are rejected when the mesh culls backfaces.
    pub fn intersect<'a>(&self, ray: &Ray) -> Option<Surfel<'a>> {
        let RawHit { t, u, v } = self.solve(ray, ray.t_max)?;

        let n = ((1.0 - u - v) * self.normal(0) + u * self.normal(1) + v * self.normal(2))
            .normalize_or_zero();
        if self.mesh.backface_cull() && n.dot(ray.direction) > 0.0 {
            return None;
        }

        Some(Surfel::new(ray.at(t), n, -ray.direction, t))
    }

    /// True if the ray hits the triangle before `max_t`. Culling does not
    /// apply to shadow queries.
    pub fn intersect_p(&self, ray: &Ray, max_t: f32) -> bool {
        self.solve(ray, max_t.min(ray.t_max)).is_some()
    }

    pub fn compute_bounds(&self) -> Bounds3f {
        Bounds3f::create_box(&[self.position(0), self.position(1), self.position(2)])
    }
}
