// picker_core/src/config.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::SessionConfig;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # PickerConfig
/// Everything the picker reads from `picker.toml`. Every section is optional;
/// a missing section falls back to its `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct PickerConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub scene: SceneConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub log: LogConfig,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CatalogConfig {
    /// Root directory of the bundled resources on disk.
    pub assets_root: PathBuf,
    /// Directory under `assets_root` holding the placeable models.
    pub models_dir: String,
    /// File extension (without dot) that marks a placeable model.
    pub model_extension: String,
    /// Directory under `assets_root` holding `<identifier>.png` thumbnails.
    pub thumbnails_dir: String,
    /// Thumbnail used when a model ships without its own image.
    pub fallback_thumbnail: String,
}

impl CatalogConfig {
    pub fn models_path(&self) -> PathBuf {
        self.assets_root.join(&self.models_dir)
    }

    pub fn thumbnails_path(&self) -> PathBuf {
        self.assets_root.join(&self.thumbnails_dir)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            assets_root: "assets".into(),
            models_dir: "models".to_string(),
            model_extension: "glb".to_string(),
            thumbnails_dir: "thumbnails".to_string(),
            fallback_thumbnail: "teapot".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SceneConfig {
    /// Name given to every anchor the picker creates. Long-press removal only
    /// touches anchors carrying this name.
    pub anchor_marker: String,
    /// How long a press must be held before it counts as a long-press.
    pub long_press_secs: f32,
    /// How far (in logical pixels) a press may drift and still be a long-press.
    pub long_press_slop_px: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            anchor_marker: "placed_model".to_string(),
            long_press_secs: 0.5,
            long_press_slop_px: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    pub level: String,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filter: "info,wgpu_core=error,wgpu_hal=error,picker_app=debug,picker_core=debug"
                .to_string(),
        }
    }
}
