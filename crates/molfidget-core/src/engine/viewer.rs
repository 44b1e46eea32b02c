use super::error::EngineError;
use super::scene::Scene;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no display available (neither DISPLAY nor WAYLAND_DISPLAY is set)")]
    NoDisplay,

    #[error("failed to launch viewer '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer '{program}' exited with {status}")]
    Exited { program: String, status: ExitStatus },

    #[error("failed to prepare the scene for the viewer: {0}")]
    Scene(#[source] Box<EngineError>),
}

impl From<EngineError> for ViewerError {
    fn from(err: EngineError) -> Self {
        Self::Scene(Box::new(err))
    }
}

/// Displays a scene to the user, blocking until the display is closed.
pub trait SceneViewer {
    fn show(&self, scene: &Scene) -> Result<(), ViewerError>;
}
