use crate::core::io::mol::MolFile;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use crate::engine::config::{CONFIG_RECORD_FILE, ShapeConfig};
use crate::engine::error::EngineError;
use crate::engine::export::{save_group_stl_files, save_stl_files};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scene::{Scene, create_trimesh_scene};
use crate::engine::viewer::SceneViewer;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// File names of the whole-scene exports, in the order they are written.
pub const SCENE_EXPORTS: [&str; 2] = ["molecule.stl", "molecule.ply"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Pdb,
    Mol,
}

impl InputFormat {
    /// Picks the reader from the file name's suffix. Matching is exact and
    /// case-sensitive: `x.PDB` is not recognized.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".pdb") {
            Some(Self::Pdb)
        } else if file_name.ends_with(".mol") {
            Some(Self::Mol)
        } else {
            None
        }
    }

    pub fn load(self, path: &Path) -> Result<Molecule, EngineError> {
        match self {
            Self::Pdb => PdbFile::read_from_path(path).map_err(|source| EngineError::Pdb {
                path: path.to_path_buf(),
                source,
            }),
            Self::Mol => MolFile::read_from_path(path).map_err(|source| EngineError::Mol {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub scale: f64,
    /// Requested clearance between separate pieces, in millimetres.
    pub shaft_gap: f64,
    pub output_dir: PathBuf,
    pub show_gui: bool,
    /// Remaining shape parameters; `scale` and `shaft_gap` are overwritten.
    pub base_config: ShapeConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            scale: 10.0,
            shaft_gap: 0.2,
            output_dir: PathBuf::from("output"),
            show_gui: false,
            base_config: ShapeConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FidgetOutput {
    /// The molecule after merging.
    pub molecule: Molecule,
    pub scene: Scene,
    pub config: ShapeConfig,
    pub written_files: Vec<PathBuf>,
}

/// Loads `file_name`, builds its scene and writes every export into
/// `options.output_dir`.
///
/// An unsupported suffix fails before anything is read or created. A viewer
/// failure is reported as a warning and the run continues; every other
/// failure is returned.
#[instrument(skip_all, name = "fidget_workflow", fields(file = file_name))]
pub fn run(
    file_name: &str,
    options: &RunOptions,
    viewer: &dyn SceneViewer,
    reporter: &ProgressReporter,
) -> Result<FidgetOutput, EngineError> {
    let config = options
        .base_config
        .clone()
        .with_scale_and_gap(options.scale, options.shaft_gap);

    let format =
        InputFormat::from_file_name(file_name).ok_or_else(|| EngineError::UnsupportedFormat {
            file_name: file_name.to_string(),
        })?;

    reporter.report(Progress::PhaseStart {
        name: "Building scene",
    });
    let mut molecule = format.load(Path::new(file_name))?;
    let scene = create_trimesh_scene(&molecule, &config)?;
    reporter.report(Progress::PhaseFinish);
    if let Some((lo, hi)) = scene.bounds() {
        let size = hi - lo;
        info!(
            "Model extent: {:.1} x {:.1} x {:.1} mm.",
            size.x, size.y, size.z
        );
    }

    if options.show_gui {
        if let Err(e) = viewer.show(&scene) {
            warn!("Viewer failed: {}", e);
            reporter.report(Progress::Warning(format!("Unable to start GUI: {}", e)));
            reporter.report(Progress::Message(
                "Continuing with file processing...".to_string(),
            ));
        }
    }

    let output_dir = options.output_dir.as_path();
    std::fs::create_dir_all(output_dir).map_err(|e| EngineError::io(output_dir, e))?;

    let mut written_files = Vec::new();
    for name in SCENE_EXPORTS {
        let path = output_dir.join(name);
        scene.export(&path)?;
        written_files.push(path);
    }

    written_files.extend(save_stl_files(&scene, output_dir, reporter)?);
    info!("Loaded {} atoms from {}", molecule.atoms().len(), file_name);
    reporter.report(Progress::Message(format!(
        "Loaded {} atoms from {}",
        molecule.atoms().len(),
        file_name
    )));

    molecule.merge_atoms(config.merge_hydrogens);
    written_files.extend(save_group_stl_files(
        &molecule,
        &config,
        output_dir,
        reporter,
    )?);

    let record_path = output_dir.join(CONFIG_RECORD_FILE);
    config.write_record(file_name, &record_path)?;
    written_files.push(record_path);

    info!(
        "Wrote {} files to '{}'.",
        written_files.len(),
        output_dir.display()
    );
    reporter.report(Progress::Message(format!(
        "Files saved to: {}",
        output_dir.display()
    )));

    Ok(FidgetOutput {
        molecule,
        scene,
        config,
        written_files,
    })
}
