//! Wavefront OBJ loading.
//!
//! Every model in the file is merged into a single `TriangleMesh`; faces are
//! triangulated by `tobj`.

use crate::mesh::{MeshError, MeshOptions, MeshResult, TriangleMesh};
use glint_math::Vec3;
use std::path::Path;

/// Load an OBJ file into one triangle mesh.
///
/// Normals come from the file when every model provides them; otherwise (or
/// when `options.compute_normals` is set) smooth normals are computed.
pub fn load_obj<P: AsRef<Path>>(path: P, options: &MeshOptions) -> MeshResult<TriangleMesh> {
    let path = path.as_ref();
    log::info!("Loading {}", path.display());

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| MeshError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut vertex_indices = Vec::new();
    let mut normal_indices = Vec::new();
    let mut all_have_normals = !models.is_empty();

    for model in &models {
        let mesh = &model.mesh;
        let vertex_offset = positions.len() as u32;
        let normal_offset = normals.len() as u32;

        positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
        normals.extend(mesh.normals.chunks_exact(3).map(Vec3::from_slice));
        vertex_indices.extend(mesh.indices.iter().map(|i| i + vertex_offset));

        if mesh.normals.is_empty() {
            all_have_normals = false;
        } else if mesh.normal_indices.is_empty() {
            // Normals indexed like the positions.
            normal_indices.extend(mesh.indices.iter().map(|i| i + normal_offset));
        } else {
            normal_indices.extend(mesh.normal_indices.iter().map(|i| i + normal_offset));
        }
    }

    log::info!(
        "OBJ summary: {} models, {} vertices, {} normals, {} triangles",
        models.len(),
        positions.len(),
        normals.len(),
        vertex_indices.len() / 3
    );

    if !all_have_normals && !options.compute_normals {
        log::debug!("{} has no usable normals, computing smooth normals", path.display());
    }

    let normals = all_have_normals.then_some((normals, normal_indices));
    TriangleMesh::assemble(positions, normals, vertex_indices, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_obj(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_triangle_with_normals() {
        let _ = env_logger::builder().is_test(true).try_init();
        let file = write_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 2\nf 1//1 2//1 3//1\n",
        );

        let mesh = load_obj(file.path(), &MeshOptions::default()).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        let [n0, _, _] = mesh.normal_triplet(0);
        assert_eq!(mesh.normals()[n0], Vec3::Z);
    }

    #[test]
    fn test_load_quad_is_triangulated_and_normals_computed() {
        let file = write_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");

        let mesh = load_obj(file.path(), &MeshOptions::default()).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        for n in mesh.normals() {
            assert!((*n - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_obj("/definitely/not/here.obj", &MeshOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::Obj { .. }));
    }

    #[test]
    fn test_file_without_faces_is_empty() {
        let file = write_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\n");
        let err = load_obj(file.path(), &MeshOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::Empty));
    }
}
