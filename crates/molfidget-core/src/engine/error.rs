use super::config::ConfigError;
use crate::core::io::mol::MolError;
use crate::core::io::pdb::PdbError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unsupported file format: {file_name}. Please provide .pdb or .mol file.")]
    UnsupportedFormat { file_name: String },

    #[error("Failed to read PDB file '{path}': {source}", path = path.display())]
    Pdb {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to read MOL file '{path}': {source}", path = path.display())]
    Mol {
        path: PathBuf,
        #[source]
        source: MolError,
    },

    #[error("Invalid shape configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Cannot export scene to '{path}': expected a .stl or .ply extension", path = path.display())]
    UnsupportedExport { path: PathBuf },

    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration record: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Atoms must be merged before group meshes can be exported")]
    AtomsNotMerged,
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
