pub mod defaults;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use molfidget::engine::config::ShapeConfig;
use molfidget::workflows::fidget::RunOptions;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Shape parameters as they appear in a TOML config file. Every key is
/// optional; `shaft-gap` is in millimetres like the `--shaft-gap` flag.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialShapeConfig {
    scale: Option<f64>,
    shaft_gap: Option<f64>,
    atom_radius_scale: Option<f64>,
    shaft_radius: Option<f64>,
    sphere_segments: Option<u32>,
    shaft_segments: Option<u32>,
    merge_hydrogens: Option<bool>,
}

impl PartialShapeConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Resolves the run options: command-line flags win over the file, the
    /// file wins over the built-in defaults.
    pub fn merge_with_cli(self, cli: &Cli) -> Result<RunOptions> {
        let defaults = DefaultsConfig::default();
        let shape_defaults = ShapeConfig::default();

        let segments = |value: Option<u32>, default: u32, key: &str| -> Result<u32> {
            let value = value.unwrap_or(default);
            if value < 3 {
                return Err(CliError::Config(format!(
                    "`{}` must be at least 3 (got {})",
                    key, value
                )));
            }
            Ok(value)
        };

        let base_config = ShapeConfig {
            atom_radius_scale: self
                .atom_radius_scale
                .unwrap_or(shape_defaults.atom_radius_scale),
            shaft_radius: self.shaft_radius.unwrap_or(shape_defaults.shaft_radius),
            sphere_segments: segments(
                self.sphere_segments,
                shape_defaults.sphere_segments,
                "sphere-segments",
            )?,
            shaft_segments: segments(
                self.shaft_segments,
                shape_defaults.shaft_segments,
                "shaft-segments",
            )?,
            merge_hydrogens: self
                .merge_hydrogens
                .unwrap_or(shape_defaults.merge_hydrogens),
            ..shape_defaults
        };

        Ok(RunOptions {
            scale: cli.scale.or(self.scale).unwrap_or(defaults.scale),
            shaft_gap: cli.shaft_gap.or(self.shaft_gap).unwrap_or(defaults.shaft_gap),
            output_dir: cli.output_dir.clone().unwrap_or(defaults.output_dir),
            show_gui: cli.show_gui,
            base_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("shape.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("molfidget").chain(args.iter().copied()))
    }

    #[test]
    fn no_file_and_no_flags_gives_defaults() {
        let options = PartialShapeConfig::load(None)
            .unwrap()
            .merge_with_cli(&parse(&["ethanol.pdb"]))
            .unwrap();
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            scale = 20.0
            shaft-gap = 0.5
            shaft-radius = 0.2
            sphere-segments = 32
            merge-hydrogens = false
            "#,
        );
        let options = PartialShapeConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&parse(&["ethanol.pdb"]))
            .unwrap();

        assert_eq!(options.scale, 20.0);
        assert_eq!(options.shaft_gap, 0.5);
        assert_eq!(options.base_config.shaft_radius, 0.2);
        assert_eq!(options.base_config.sphere_segments, 32);
        assert!(!options.base_config.merge_hydrogens);
        assert_eq!(
            options.base_config.shaft_segments,
            ShapeConfig::default().shaft_segments
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "scale = 20.0\nshaft-gap = 0.5\n");
        let cli = parse(&[
            "ethanol.pdb",
            "--scale",
            "4",
            "--shaft-gap",
            "0.1",
            "--output-dir",
            "prints",
            "--show-gui",
        ]);
        let options = PartialShapeConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&cli)
            .unwrap();

        assert_eq!(options.scale, 4.0);
        assert_eq!(options.shaft_gap, 0.1);
        assert_eq!(options.output_dir, PathBuf::from("prints"));
        assert!(options.show_gui);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "shaft_gap = 0.5\n");
        assert!(matches!(
            PartialShapeConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn too_few_segments_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "shaft-segments = 2\n");
        let result = PartialShapeConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&parse(&["ethanol.pdb"]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("shaft-segments")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PartialShapeConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
