use std::path::PathBuf;

/// Values used when neither the command line nor a config file sets them.
pub struct DefaultsConfig {
    pub scale: f64,
    pub shaft_gap: f64,
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            shaft_gap: 0.2,
            output_dir: PathBuf::from("output"),
        }
    }
}
