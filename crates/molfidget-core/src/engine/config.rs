use super::error::EngineError;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Upper bound on the shaft gap, in Angstroms, whatever the requested gap and scale.
pub const MAX_SHAFT_GAP: f64 = 0.05;

/// Name of the configuration record written next to the exported meshes.
pub const CONFIG_RECORD_FILE: &str = "config.yaml";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("'{name}' must be {requirement} (got {value})")]
    OutOfRange {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Geometry parameters for building printable pieces.
///
/// Lengths are in Angstroms, in the molecule's own coordinate frame; `scale`
/// converts them to millimetres when meshes are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Millimetres per Angstrom in the exported meshes.
    pub scale: f64,
    /// Clearance between the two half-shafts of a bond joining separate pieces.
    pub shaft_gap: f64,
    /// Sphere radius as a fraction of the van der Waals radius.
    pub atom_radius_scale: f64,
    pub shaft_radius: f64,
    pub sphere_segments: u32,
    pub shaft_segments: u32,
    /// Whether `merge_atoms` folds terminal hydrogens into their heavy atom.
    pub merge_hydrogens: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            shaft_gap: 0.03,
            atom_radius_scale: 0.3,
            shaft_radius: 0.12,
            sphere_segments: 24,
            shaft_segments: 16,
            merge_hydrogens: true,
        }
    }
}

/// Converts a gap requested in millimetres into the Angstrom gap used for
/// geometry, capped at [`MAX_SHAFT_GAP`].
///
/// `scale` is not checked; a zero or negative scale yields whatever the
/// division produces, still capped from above.
pub fn capped_shaft_gap(requested_gap: f64, scale: f64) -> f64 {
    (requested_gap / scale).min(MAX_SHAFT_GAP)
}

impl ShapeConfig {
    /// Returns a copy with `scale` set and `shaft_gap` derived from a gap
    /// requested in millimetres.
    pub fn with_scale_and_gap(mut self, scale: f64, requested_gap: f64) -> Self {
        self.scale = scale;
        self.shaft_gap = capped_shaft_gap(requested_gap, scale);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    name,
                    requirement: "finite and greater than zero",
                    value,
                })
            }
        };
        positive("scale", self.scale)?;
        positive("atom_radius_scale", self.atom_radius_scale)?;
        positive("shaft_radius", self.shaft_radius)?;

        if !(self.shaft_gap.is_finite() && self.shaft_gap >= 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "shaft_gap",
                requirement: "finite and not negative",
                value: self.shaft_gap,
            });
        }
        for (name, segments) in [
            ("sphere_segments", self.sphere_segments),
            ("shaft_segments", self.shaft_segments),
        ] {
            if segments < 3 {
                return Err(ConfigError::OutOfRange {
                    name,
                    requirement: "at least 3",
                    value: segments as f64,
                });
            }
        }
        Ok(())
    }

    /// Renders the configuration plus the input file name as block-style
    /// YAML with keys in alphabetical order.
    pub fn to_record_yaml(&self, file_name: &str) -> Result<String, serde_yaml::Error> {
        let Value::Mapping(mapping) = serde_yaml::to_value(self)? else {
            return Err(<serde_yaml::Error as serde::ser::Error>::custom(
                "shape configuration did not serialize to a mapping",
            ));
        };
        let mut record: BTreeMap<String, Value> = mapping
            .into_iter()
            .filter_map(|(key, value)| key.as_str().map(|k| (k.to_string(), value)))
            .collect();
        record.insert("file_name".to_string(), Value::String(file_name.to_string()));
        serde_yaml::to_string(&record)
    }

    /// Writes the record produced by [`to_record_yaml`](Self::to_record_yaml) to `path`.
    pub fn write_record(&self, file_name: &str, path: &Path) -> Result<(), EngineError> {
        let yaml = self.to_record_yaml(file_name)?;
        std::fs::write(path, yaml).map_err(|e| EngineError::io(path, e))
    }
}
