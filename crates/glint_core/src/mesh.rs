//! Indexed triangle mesh database.
//!
//! A `TriangleMesh` owns the vertex and normal arrays plus flattened index
//! lists, three entries per triangle. Triangles in the renderer only hold a
//! shared handle to the mesh and their own triangle index.

use glint_math::Vec3;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling or loading a mesh.
///
/// All of these are fatal configuration errors: they are reported before any
/// ray is traced.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("mesh has no triangles")]
    Empty,

    #[error("index list length {0} is not a multiple of 3")]
    RaggedIndices(usize),

    #[error("vertex index list ({vertex}) and normal index list ({normal}) differ in length")]
    IndexListMismatch { vertex: usize, normal: usize },

    #[error("vertex index {index} out of range ({len} vertices)")]
    VertexIndexOutOfRange { index: u32, len: usize },

    #[error("normal index {index} out of range ({len} normals)")]
    NormalIndexOutOfRange { index: u32, len: usize },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Modifiers applied when a mesh is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshOptions {
    /// Swap winding of every triangle
    pub reverse_vertex_order: bool,
    /// Ignore supplied normals and compute smooth ones
    pub compute_normals: bool,
    /// Negate every normal
    pub flip_normals: bool,
    /// Reject hits on faces whose normal points along the ray
    pub backface_cull: bool,
}

/// Indexed triangle mesh.
///
/// Invariant (checked by [`TriangleMesh::new`]): both index lists have the
/// same non-zero length, divisible by 3, and every entry is in range.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    vertex_indices: Vec<u32>,
    normal_indices: Vec<u32>,
    backface_cull: bool,
}

impl TriangleMesh {
    /// Create a mesh with separate vertex and normal index lists.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        vertex_indices: Vec<u32>,
        normal_indices: Vec<u32>,
    ) -> MeshResult<Self> {
        let mesh = Self {
            positions,
            normals: normals.into_iter().map(|n| n.normalize_or_zero()).collect(),
            vertex_indices,
            normal_indices,
            backface_cull: false,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Create a mesh where normals are indexed like the vertices.
    pub fn with_shared_indices(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> MeshResult<Self> {
        let normal_indices = indices.clone();
        Self::new(positions, normals, indices, normal_indices)
    }

    /// Assemble a mesh applying `options`.
    ///
    /// Normals are computed when `normals` is `None` or when the options ask
    /// for it; in that case the normal index list mirrors the vertex list.
    pub fn assemble(
        positions: Vec<Vec3>,
        normals: Option<(Vec<Vec3>, Vec<u32>)>,
        mut vertex_indices: Vec<u32>,
        options: &MeshOptions,
    ) -> MeshResult<Self> {
        if vertex_indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(vertex_indices.len()));
        }

        let mut normals = normals.filter(|_| !options.compute_normals);
        if options.reverse_vertex_order {
            reverse_triangles(&mut vertex_indices);
            if let Some((_, normal_indices)) = normals.as_mut() {
                reverse_triangles(normal_indices);
            }
        }

        let mut mesh = match normals {
            Some((normals, normal_indices)) => {
                Self::new(positions, normals, vertex_indices, normal_indices)?
            }
            None => {
                let count = positions.len();
                let mut mesh =
                    Self::with_shared_indices(positions, vec![Vec3::Y; count], vertex_indices)?;
                mesh.compute_normals();
                mesh
            }
        };

        if options.flip_normals {
            for n in &mut mesh.normals {
                *n = -*n;
            }
        }
        mesh.backface_cull = options.backface_cull;
        Ok(mesh)
    }

    /// Enable or disable backface culling.
    pub fn with_backface_cull(mut self, cull: bool) -> Self {
        self.backface_cull = cull;
        self
    }

    /// Check the index invariants.
    pub fn validate(&self) -> MeshResult<()> {
        if self.vertex_indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.vertex_indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.vertex_indices.len()));
        }
        if self.vertex_indices.len() != self.normal_indices.len() {
            return Err(MeshError::IndexListMismatch {
                vertex: self.vertex_indices.len(),
                normal: self.normal_indices.len(),
            });
        }
        if let Some(&index) = self
            .vertex_indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(MeshError::VertexIndexOutOfRange {
                index,
                len: self.positions.len(),
            });
        }
        if let Some(&index) = self
            .normal_indices
            .iter()
            .find(|&&i| i as usize >= self.normals.len())
        {
            return Err(MeshError::NormalIndexOutOfRange {
                index,
                len: self.normals.len(),
            });
        }
        Ok(())
    }

    /// Replace normals with smooth per-vertex normals (area-weighted face
    /// normals, counter-clockwise winding). Normal indices follow the
    /// vertex indices afterwards.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in self.vertex_indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
            let p0 = self.positions[i0];
            let face_normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = normals;
        self.normal_indices = self.vertex_indices.clone();
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertex_indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn backface_cull(&self) -> bool {
        self.backface_cull
    }

    /// Vertex index triplet of triangle `tri`.
    pub fn vertex_triplet(&self, tri: usize) -> [usize; 3] {
        triplet(&self.vertex_indices, tri)
    }

    /// Normal index triplet of triangle `tri`.
    pub fn normal_triplet(&self, tri: usize) -> [usize; 3] {
        triplet(&self.normal_indices, tri)
    }
}

fn triplet(indices: &[u32], tri: usize) -> [usize; 3] {
    let base = 3 * tri;
    [
        indices[base] as usize,
        indices[base + 1] as usize,
        indices[base + 2] as usize,
    ]
}

fn reverse_triangles(indices: &mut [u32]) {
    for face in indices.chunks_exact_mut(3) {
        face.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = TriangleMesh::with_shared_indices(
            quad_positions(),
            vec![Vec3::Z; 4],
            vec![0, 1, 2, 1, 3, 2],
        )
        .unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_triplet(1), [1, 3, 2]);
        assert!(!mesh.backface_cull());
    }

    #[test]
    fn test_rejects_empty_mesh() {
        let err = TriangleMesh::with_shared_indices(quad_positions(), vec![Vec3::Z; 4], vec![])
            .unwrap_err();
        assert!(matches!(err, MeshError::Empty));
    }

    #[test]
    fn test_rejects_ragged_indices() {
        let err =
            TriangleMesh::with_shared_indices(quad_positions(), vec![Vec3::Z; 4], vec![0, 1])
                .unwrap_err();
        assert!(matches!(err, MeshError::RaggedIndices(2)));
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        let err =
            TriangleMesh::with_shared_indices(quad_positions(), vec![Vec3::Z; 4], vec![0, 1, 9])
                .unwrap_err();
        assert!(matches!(
            err,
            MeshError::VertexIndexOutOfRange { index: 9, len: 4 }
        ));

        let err = TriangleMesh::new(quad_positions(), vec![Vec3::Z], vec![0, 1, 2], vec![0, 0, 1])
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::NormalIndexOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn test_rejects_mismatched_index_lists() {
        let err = TriangleMesh::new(quad_positions(), vec![Vec3::Z], vec![0, 1, 2], vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexListMismatch { vertex: 3, normal: 0 }
        ));
    }

    #[test]
    fn test_compute_normals_ccw() {
        let mesh = TriangleMesh::assemble(
            quad_positions(),
            None,
            vec![0, 1, 2, 1, 3, 2],
            &MeshOptions::default(),
        )
        .unwrap();

        for n in mesh.normals() {
            assert!((*n - Vec3::Z).length() < 1e-5);
        }
        assert_eq!(mesh.normal_triplet(1), mesh.vertex_triplet(1));
    }

    #[test]
    fn test_reverse_and_flip_options() {
        let options = MeshOptions {
            reverse_vertex_order: true,
            flip_normals: true,
            backface_cull: true,
            ..Default::default()
        };
        let mesh = TriangleMesh::assemble(
            quad_positions(),
            Some((vec![Vec3::Z], vec![0, 0, 0])),
            vec![0, 1, 2],
            &options,
        )
        .unwrap();

        assert_eq!(mesh.vertex_triplet(0), [2, 1, 0]);
        assert_eq!(mesh.normals()[0], -Vec3::Z);
        assert!(mesh.backface_cull());
    }

    #[test]
    fn test_compute_normals_option_overrides_supplied() {
        let options = MeshOptions {
            compute_normals: true,
            ..Default::default()
        };
        let mesh = TriangleMesh::assemble(
            quad_positions(),
            Some((vec![Vec3::X], vec![0, 0, 0])),
            vec![0, 1, 2],
            &options,
        )
        .unwrap();

        assert!((mesh.normals()[0] - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_supplied_normals_are_normalized() {
        let mesh = TriangleMesh::with_shared_indices(
            quad_positions(),
            vec![Vec3::new(0.0, 0.0, 3.0); 4],
            vec![0, 1, 2],
        )
        .unwrap();
        assert_eq!(mesh.normals()[0], Vec3::Z);
    }
}
