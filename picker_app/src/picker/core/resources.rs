// picker_app/src/picker/core/resources.rs

use bevy::prelude::*;
use picker_core::{
    catalog::Catalog, gateway::SceneGateway, interaction::PlacementController, loader::ModelLoader,
};

/// The entity handle of a loaded model: the first scene of its glTF file.
pub type SceneHandle = Handle<Scene>;

// --- Resource Wrappers for Core Types ---

/// The catalog of placeable models.
#[derive(Resource, Default)]
pub struct ModelCatalog(pub Catalog<SceneHandle>);

/// The placement state machine. The only owner of the interaction state.
#[derive(Resource, Default)]
pub struct Controller(pub PlacementController<SceneHandle>);

/// In-flight model loads. Both ticket and handle are the scene handle.
#[derive(Resource)]
pub struct Loader(pub ModelLoader<SceneHandle, SceneHandle>);

#[derive(Resource)]
pub struct Gateway(pub SceneGateway);

// --- Marker Components ---

/// The camera standing in for the tracked device.
#[derive(Component)]
pub struct PickerCamera;

/// An anchor created by the gateway. Its `Name` carries the marker.
#[derive(Component)]
pub struct PlacedAnchor;
