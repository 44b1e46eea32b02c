use super::config::ShapeConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::scene::Scene;
use super::shape::{ShapeBuilder, group_piece_name};
use crate::core::mesh::stl::StlFile;
use crate::core::mesh::traits::MeshFile;
use crate::core::mesh::trimesh::TriMesh;
use crate::core::models::molecule::Molecule;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes every node of an atom scene into `output_dir` as one binary STL,
/// named after the node (`{element}_{n}.stl`).
///
/// Returns the written paths in node order.
pub fn save_stl_files(
    scene: &Scene,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<PathBuf>, EngineError> {
    let pieces = scene
        .nodes()
        .iter()
        .map(|node| (node.name.as_str(), &node.mesh));

    reporter.report(Progress::PhaseStart {
        name: "Exporting atom pieces",
    });
    let written = write_pieces(pieces, scene.len(), output_dir, reporter)?;
    reporter.report(Progress::PhaseFinish);

    info!("Saved {} atom STL files.", written.len());
    Ok(written)
}

/// Writes one binary STL per merged group into `output_dir`, named
/// `group_{n}_{formula}.stl`.
///
/// # Errors
///
/// Returns [`EngineError::AtomsNotMerged`] unless
/// [`Molecule::merge_atoms`] has run.
pub fn save_group_stl_files(
    molecule: &Molecule,
    config: &ShapeConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<PathBuf>, EngineError> {
    if !molecule.is_merged() {
        return Err(EngineError::AtomsNotMerged);
    }
    let builder = ShapeBuilder::new(molecule, config)?;
    let groups = molecule.groups();
    let pieces: Vec<(String, TriMesh)> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| (group_piece_name(index, group), builder.group_piece(group)))
        .collect();

    reporter.report(Progress::PhaseStart {
        name: "Exporting group pieces",
    });
    let written = write_pieces(
        pieces.iter().map(|(name, mesh)| (name.as_str(), mesh)),
        groups.len(),
        output_dir,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    info!("Saved {} group STL files.", written.len());
    Ok(written)
}

fn write_pieces<'a>(
    pieces: impl Iterator<Item = (&'a str, &'a TriMesh)>,
    count: usize,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<PathBuf>, EngineError> {
    reporter.report(Progress::TaskStart {
        total_steps: count as u64,
    });
    let mut written = Vec::with_capacity(count);
    for (name, mesh) in pieces {
        let path = output_dir.join(format!("{}.{}", name, StlFile::EXTENSION));
        StlFile::write_to_path(mesh, &path).map_err(|e| EngineError::io(&path, e))?;
        debug!(
            "Wrote '{}' ({} vertices, {} triangles).",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        written.push(path);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    Ok(written)
}
