// picker_app/src/picker/plugins/catalog.rs

use bevy::asset::LoadState;

use crate::prelude::*;
use picker_core::loader::LoadCompletion;

/// The Bevy side of the entity decoder: glTF scenes loaded by the
/// `AssetServer` on its own task pool.
pub struct BevyEntityDecoder<'a> {
    server: &'a AssetServer,
    models_dir: &'a str,
}

impl<'a> BevyEntityDecoder<'a> {
    pub fn new(server: &'a AssetServer, models_dir: &'a str) -> Self {
        Self { server, models_dir }
    }
}

impl EntityDecoder for BevyEntityDecoder<'_> {
    type Handle = SceneHandle;
    type Ticket = SceneHandle;

    fn start(&mut self, filename: &str) -> SceneHandle {
        let path = format!("{}/{}", self.models_dir, filename);
        self.server.load(GltfAssetLabel::Scene(0).from_asset(path))
    }

    fn poll(&mut self, ticket: &SceneHandle) -> DecodePoll<SceneHandle> {
        match self.server.get_load_state(ticket) {
            Some(LoadState::Loaded) => DecodePoll::Ready(ticket.clone()),
            Some(LoadState::Failed(err)) => DecodePoll::Failed(err.to_string()),
            _ => DecodePoll::Pending,
        }
    }
}

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app
            // --- STAGE 1: ASSET LOADING ---
            // Scan the catalog, kick off every load, then go live. Loads keep
            // completing while the app is running.
            .add_systems(
                OnEnter(AppState::AssetLoading),
                (build_catalog, start_model_loads, transition_to_running).chain(),
            )
            // --- STAGE 2: RUNNING ---
            .add_systems(Update, poll_model_loads.in_set(PickerSet::Loading));
    }
}

fn build_catalog(settings: Res<PickerSettings>, mut catalog: ResMut<ModelCatalog>) {
    let config = &settings.0.catalog;
    info!("[ASSETS] Loading model catalog from: {:?}", config.models_path());

    let images = DirImageStore::new(config.thumbnails_path());
    catalog.0 = Catalog::build(&DirResourceStore, &images, config);

    if catalog.0.is_empty() {
        warn!("[ASSETS] No placeable models found, the thumbnail strip will be empty.");
    }
}

fn start_model_loads(
    asset_server: Res<AssetServer>,
    settings: Res<PickerSettings>,
    catalog: Res<ModelCatalog>,
    mut loader: ResMut<Loader>,
) {
    let mut decoder = BevyEntityDecoder::new(&asset_server, &settings.0.catalog.models_dir);
    let started = loader.0.request_all(catalog.0.records(), &mut decoder);
    info!("[ASSETS] Started loading {} model(s).", started);
}

fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Catalog ready. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

/// Delivers finished loads into their records on the main schedule.
fn poll_model_loads(
    asset_server: Res<AssetServer>,
    settings: Res<PickerSettings>,
    mut loader: ResMut<Loader>,
) {
    if loader.0.in_flight() == 0 {
        return;
    }

    let mut decoder = BevyEntityDecoder::new(&asset_server, &settings.0.catalog.models_dir);
    for completion in loader.0.poll_completions(&mut decoder) {
        if let LoadCompletion::Loaded { identifier } = completion {
            debug!("[ASSETS] '{}' is ready to place.", identifier);
        }
    }
}
