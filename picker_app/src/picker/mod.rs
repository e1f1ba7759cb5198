// picker_app/src/picker/mod.rs

pub mod config;
pub mod core;
pub mod plugins;
