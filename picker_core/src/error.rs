// picker_core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the picker knows about. None of them is fatal: callers log
/// the error and degrade the affected item instead of stopping the app.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PickerError {
    #[error("model catalog at {path:?} is unavailable: {reason}")]
    CatalogUnavailable { path: PathBuf, reason: String },

    #[error("unable to load entity for model '{identifier}': {reason}")]
    AssetLoadFailed { identifier: String, reason: String },

    #[error("model '{identifier}' has no loaded entity, placement skipped")]
    PlacementWithoutHandle { identifier: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}
