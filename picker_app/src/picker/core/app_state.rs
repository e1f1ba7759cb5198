// picker_app/src/picker/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The catalog is scanned and model loads are started.
    #[default]
    AssetLoading,

    /// The live view is up. Loads keep completing in the background while
    /// the user browses and places models.
    Running,
}

/// System sets for the per-frame interaction pipeline in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PickerSet {
    /// Raw pointer and button input becomes picker events.
    Input,
    /// Finished model loads are written into their records.
    Loading,
    /// Picker events drive the placement state machine.
    Interaction,
    /// The gateway observes the one-shot request and long-presses.
    Attach,
    /// Placed content follows manipulation gestures.
    Manipulation,
    /// The reticle and UI are brought in line with the state.
    Present,
}
