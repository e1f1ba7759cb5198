// picker_app/src/main.rs

//! Entry point of the model picker.
//!
//! Loads `picker.toml` (or the file given with `--config`), then either
//! prints the model catalog (`--list-models`) or opens the live view.

use avian3d::prelude::*;
use bevy::{
    asset::AssetPlugin,
    log::{Level, LogPlugin},
    prelude::*,
};
use clap::Parser;

use picker_app::cli::Cli;
use picker_app::picker::config::{describe_source, load_config, PickerSettings};
use picker_app::ModelPickerPlugin;
use picker_core::prelude::{Catalog, DirImageStore, DirResourceStore, PickerConfig};

fn main() -> AppExit {
    let cli = Cli::parse();

    // --- 1. Load Picker Configuration ---
    // Logging is not up yet, so problems go to stderr.
    let config_source = describe_source(&cli.config);
    let config = load_config(&cli.config).unwrap_or_else(|err| {
        eprintln!("{}; continuing with the default configuration.", err);
        PickerConfig::default()
    });

    if cli.list_models {
        list_models(&config);
        return AppExit::Success;
    }

    let level = config.log.level.parse::<Level>().unwrap_or(Level::INFO);
    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level,
                filter: config.log.filter.clone(),
                ..default()
            })
            .set(AssetPlugin {
                file_path: config.catalog.assets_root.to_string_lossy().into_owned(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Model Picker".to_string(),
                    ..default()
                }),
                ..default()
            }),
    )
    // Ray casts for the reticle and hit tests, colliders for placed content.
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(PickerSettings(config));
    info!("{}", config_source);

    // --- 3. Add the Model Picker Plugin ---
    app.add_plugins(ModelPickerPlugin);

    // --- 4. Run the App ---
    app.run()
}

/// Prints what the thumbnail strip would offer.
fn list_models(config: &PickerConfig) {
    let images = DirImageStore::new(config.catalog.thumbnails_path());
    let catalog = Catalog::<()>::build(&DirResourceStore, &images, &config.catalog);

    if catalog.is_empty() {
        println!("No models found in {}", config.catalog.models_path().display());
        return;
    }
    for record in catalog.records() {
        let thumbnail = record.thumbnail();
        if thumbnail.is_fallback {
            println!("{} (thumbnail: {}, fallback)", record.identifier(), thumbnail.image_name);
        } else {
            println!("{} (thumbnail: {})", record.identifier(), thumbnail.image_name);
        }
    }
}
