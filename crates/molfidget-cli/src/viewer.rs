use molfidget::engine::scene::Scene;
use molfidget::engine::viewer::{SceneViewer, ViewerError};
use std::process::Command;
use tracing::{debug, info};

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Shows a scene by writing it to a temporary PLY file and opening that file
/// in an external mesh viewer. Blocks until the viewer exits.
pub struct ExternalViewer {
    program: String,
    env: EnvLookup,
}

impl ExternalViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_env(program, Box::new(|key: &str| std::env::var(key).ok()))
    }

    pub fn with_env(program: impl Into<String>, env: EnvLookup) -> Self {
        Self {
            program: program.into(),
            env,
        }
    }

    fn has_display(&self) -> bool {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            return true;
        }
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|key| (self.env)(key).is_some_and(|value| !value.is_empty()))
    }
}

impl SceneViewer for ExternalViewer {
    fn show(&self, scene: &Scene) -> Result<(), ViewerError> {
        if !self.has_display() {
            return Err(ViewerError::NoDisplay);
        }

        let dir = tempfile::tempdir().map_err(|source| ViewerError::Launch {
            program: self.program.clone(),
            source,
        })?;
        let path = dir.path().join("molecule.ply");
        scene.export(&path)?;

        info!("Opening scene in '{}'; close the viewer to continue.", self.program);
        let status = Command::new(&self.program)
            .arg(&path)
            .status()
            .map_err(|source| ViewerError::Launch {
                program: self.program.clone(),
                source,
            })?;
        debug!("Viewer exited with {}.", status);

        if status.success() {
            Ok(())
        } else {
            Err(ViewerError::Exited {
                program: self.program.clone(),
                status,
            })
        }
    }
}
