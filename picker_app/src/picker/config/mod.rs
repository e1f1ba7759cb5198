// picker_app/src/picker/config/mod.rs

//! This module loads the picker configuration: built-in defaults, then the
//! TOML file, then `PICKER_`-prefixed environment variables.

use bevy::prelude::*;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use picker_core::{config::PickerConfig, error::PickerError};
use std::path::Path;

/// The resolved configuration as a Bevy resource.
#[derive(Resource, Debug, Clone, Default)]
pub struct PickerSettings(pub PickerConfig);

/// Says where the configuration comes from. Logged by `main` once the log
/// subscriber is installed, which happens after the config is loaded.
pub fn describe_source(path: &Path) -> String {
    if path.exists() {
        format!("Loaded picker configuration from: {}", path.display())
    } else {
        format!("No configuration file at {}, using defaults.", path.display())
    }
}

/// Loads the configuration. A missing file is not an error; a malformed one
/// is, so the caller can decide to fall back to defaults.
pub fn load_config(path: &Path) -> Result<PickerConfig, PickerError> {
    Figment::from(Serialized::defaults(PickerConfig::default()))
        .merge(Toml::file(path))
        // PICKER_SCENE__ANCHOR_MARKER -> scene.anchor_marker
        .merge(Env::prefixed("PICKER_").split("__"))
        .extract()
        .map_err(|e| PickerError::Config(e.to_string()))
}
