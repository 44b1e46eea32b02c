use super::config::ShapeConfig;
use super::error::EngineError;
use super::shape::{ShapeBuilder, atom_piece_name};
use crate::core::mesh::ply::PlyFile;
use crate::core::mesh::stl::StlFile;
use crate::core::mesh::traits::MeshFile;
use crate::core::mesh::trimesh::TriMesh;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub mesh: TriMesh,
}

/// Named meshes in millimetres, one node per atom piece.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, mesh: TriMesh) {
        self.nodes.push(SceneNode {
            name: name.into(),
            mesh,
        });
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|n| n.mesh.triangle_count()).sum()
    }

    /// Axis-aligned bounding box over all nodes, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        self.nodes
            .iter()
            .filter_map(|n| n.mesh.bounds())
            .reduce(|(lo, hi), (l, h)| (lo.inf(&l), hi.sup(&h)))
    }

    /// All node meshes merged into one, in node order.
    pub fn combined_mesh(&self) -> TriMesh {
        TriMesh::concatenate(self.nodes.iter().map(|n| &n.mesh))
    }

    /// Writes the whole scene as one mesh; the format follows the extension
    /// of `path` (`.stl` or `.ply`, case-insensitive).
    pub fn export(&self, path: &Path) -> Result<(), EngineError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let mesh = self.combined_mesh();
        let result = match extension.as_deref() {
            Some(ext) if ext == StlFile::EXTENSION => StlFile::write_to_path(&mesh, path),
            Some(ext) if ext == PlyFile::EXTENSION => PlyFile::write_to_path(&mesh, path),
            _ => {
                return Err(EngineError::UnsupportedExport {
                    path: path.to_path_buf(),
                });
            }
        };
        result.map_err(|e| EngineError::io(path, e))?;
        debug!(
            "Exported {} triangles to '{}'.",
            mesh.triangle_count(),
            path.display()
        );
        Ok(())
    }
}

/// Builds the display scene: one node per atom, named `{element}_{n}`.
pub fn create_trimesh_scene(
    molecule: &Molecule,
    config: &ShapeConfig,
) -> Result<Scene, EngineError> {
    let builder = ShapeBuilder::new(molecule, config)?;
    let mut scene = Scene::new();
    for index in 0..molecule.atoms().len() {
        scene.push(atom_piece_name(molecule, index), builder.atom_piece(index));
    }
    debug!(
        "Built scene with {} nodes and {} triangles.",
        scene.len(),
        scene.triangle_count()
    );
    Ok(scene)
}
