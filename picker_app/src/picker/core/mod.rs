// picker_app/src/picker/core/mod.rs

use bevy::prelude::*;
use picker_core::{gateway::SceneGateway, loader::ModelLoader};

use crate::picker::config::PickerSettings;
use app_state::{AppState, PickerSet};
use events::{ControlPressed, DragGesture, LongPressed, ThumbnailTapped};
use resources::{Controller, Gateway, Loader, ModelCatalog};

pub mod app_state;
pub mod events;
pub mod resources;

pub struct PickerCorePlugin;

impl Plugin for PickerCorePlugin {
    fn build(&self, app: &mut App) {
        // Settings are normally inserted by `main`; fall back to defaults.
        if !app.world().contains_resource::<PickerSettings>() {
            warn!("PickerSettings not found, using the default configuration.");
            app.init_resource::<PickerSettings>();
        }
        let settings = app.world().resource::<PickerSettings>().0.clone();

        app.init_state::<AppState>()
            // --- INITIALIZE RESOURCES & EVENTS ---
            .init_resource::<ModelCatalog>()
            .init_resource::<Controller>()
            .insert_resource(Loader(ModelLoader::new(
                settings.catalog.model_extension.clone(),
            )))
            .insert_resource(Gateway(SceneGateway::new(
                settings.scene.anchor_marker.clone(),
            )))
            .add_event::<ThumbnailTapped>()
            .add_event::<ControlPressed>()
            .add_event::<LongPressed>()
            .add_event::<DragGesture>();

        // --- CONFIGURE THE FRAME PIPELINE ---
        // This chain guarantees input is read before the state machine moves,
        // and the gateway acts before anything is drawn.
        app.configure_sets(
            Update,
            (
                PickerSet::Input,
                PickerSet::Loading,
                PickerSet::Interaction,
                PickerSet::Attach,
                PickerSet::Manipulation,
                PickerSet::Present,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        // The one-shot request is cleared in a later schedule than the one
        // that observed it.
        app.add_systems(
            PostUpdate,
            finish_placement_tick.run_if(in_state(AppState::Running)),
        );
    }
}

fn finish_placement_tick(mut controller: ResMut<Controller>) {
    if !controller.0.state().pending().is_empty() {
        controller.0.finish_tick();
    }
}
