// picker_core/src/lib.rs

// Engine-agnostic half of the model picker: catalog, loading, the
// placement state machine and the seams the scene collaborator plugs into.
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod interaction;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod presentation;
pub mod reticle;
pub mod session;
pub mod types;
