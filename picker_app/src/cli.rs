use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Model Picker: browse 3D models, place them on detected surfaces, and
/// long-press to remove them.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the picker TOML configuration file.
    #[arg(short, long, default_value = "picker.toml")]
    pub config: PathBuf,

    /// Print the model catalog and exit without opening a window.
    #[arg(long, default_value_t = false)]
    pub list_models: bool,
}
