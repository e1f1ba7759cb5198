// picker_core/src/session.rs

//! World-tracking session options handed to the scene collaborator when the
//! live view starts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl PlaneDetection {
    pub fn detects_horizontal(self) -> bool {
        matches!(self, PlaneDetection::Horizontal | PlaneDetection::Both)
    }

    pub fn detects_vertical(self) -> bool {
        matches!(self, PlaneDetection::Vertical | PlaneDetection::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentTexturing {
    None,
    #[default]
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneReconstruction {
    None,
    /// Only honored when the collaborator reports mesh support.
    #[default]
    Mesh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct SessionConfig {
    pub plane_detection: PlaneDetection,
    pub environment_texturing: EnvironmentTexturing,
    pub scene_reconstruction: SceneReconstruction,
}

impl SessionConfig {
    /// Returns the configuration that will actually run, given what the
    /// session can do. Mesh reconstruction is dropped when unsupported.
    pub fn resolve(self, session: &dyn ArSession) -> SessionConfig {
        let mut resolved = self;
        if resolved.scene_reconstruction == SceneReconstruction::Mesh
            && !session.supports_mesh_reconstruction()
        {
            tracing::info!("Scene reconstruction not supported, running without mesh.");
            resolved.scene_reconstruction = SceneReconstruction::None;
        }
        resolved
    }
}

/// The tracking session owned by the scene collaborator.
pub trait ArSession {
    fn supports_mesh_reconstruction(&self) -> bool;

    fn run(&mut self, config: &SessionConfig);
}

/// Resolves `config` against `session` and starts it.
pub fn start_session(session: &mut dyn ArSession, config: SessionConfig) -> SessionConfig {
    let resolved = config.resolve(session);
    tracing::info!(
        "Starting session: planes={:?}, texturing={:?}, reconstruction={:?}",
        resolved.plane_detection,
        resolved.environment_texturing,
        resolved.scene_reconstruction
    );
    session.run(&resolved);
    resolved
}
