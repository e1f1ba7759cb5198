// picker_app/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the app crate.
use crate::picker::core::PickerCorePlugin;
use crate::picker::plugins::catalog::CatalogPlugin;
use crate::picker::plugins::input::PointerInputPlugin;
use crate::picker::plugins::interaction::InteractionPlugin;
use crate::picker::plugins::manipulation::ManipulationPlugin;
use crate::picker::plugins::reticle::ReticlePlugin;
use crate::picker::plugins::scene::SceneAttachmentPlugin;
use crate::picker::plugins::session::SessionPlugin;
use crate::picker::plugins::ui::PickerUiPlugin;

// This prelude is for convenience for other files WITHIN the picker_app crate.
pub mod prelude;

pub mod cli;
pub mod picker;

/// The main plugin that brings together all the picker parts.
/// `main.rs` adds this one plugin to the Bevy App.
pub struct ModelPickerPlugin;

impl Plugin for ModelPickerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // States, schedule sets, events and the shared resources.
            PickerCorePlugin,
            // Camera, lights and the detected planes of the tracked world.
            SessionPlugin,
            // Model enumeration and asynchronous loading.
            CatalogPlugin,
            // Taps, long-presses and drags on the live view.
            PointerInputPlugin,
            // Selection and the cancel/place/delete controls.
            InteractionPlugin,
            // Placement and removal of anchors.
            SceneAttachmentPlugin,
            ManipulationPlugin,
            ReticlePlugin,
            // Thumbnail strip and placement controls.
            PickerUiPlugin,
        ));
    }
}
