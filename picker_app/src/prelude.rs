// picker_app/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the picker_core prelude so plugins can reach the pure types
// like `PlacementController`, `SceneGateway`, `Presentation`, etc.
pub use picker_core::prelude::*;

// Re-export common app-specific types for easy access in other plugins.
pub use crate::picker::config::PickerSettings;
pub use crate::picker::core::app_state::{AppState, PickerSet};
pub use crate::picker::core::events::{ControlPressed, DragGesture, LongPressed, ThumbnailTapped};
pub use crate::picker::core::resources::{
    Controller, Gateway, Loader, ModelCatalog, PickerCamera, PlacedAnchor, SceneHandle,
};
