// picker_app/src/picker/plugins/mod.rs

pub mod catalog;
pub mod input;
pub mod interaction;
pub mod manipulation;
pub mod reticle;
pub mod scene;
pub mod session;
pub mod ui;
