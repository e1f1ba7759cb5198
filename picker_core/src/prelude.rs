// picker_core/src/prelude.rs

// --- Core Abstractions (The collaborator contracts) ---
pub use crate::catalog::{ImageStore, ResourceStore};
pub use crate::gateway::ArScene;
pub use crate::loader::EntityDecoder;
pub use crate::session::ArSession;

// --- Core Data Structures ---
pub use crate::catalog::{Catalog, DirImageStore, DirResourceStore};
pub use crate::config::PickerConfig;
pub use crate::error::PickerError;
pub use crate::interaction::{InteractionMode, PlacementController, PlacementRequest};
pub use crate::model::{LoadStatus, ModelRecord, Thumbnail};
pub use crate::types::{AnchorId, ScreenPoint, SurfacePoint};

// --- Services ---
pub use crate::gateway::{GatewayOutcome, GestureSet, RemovalOutcome, SceneGateway, SceneHit};
pub use crate::loader::{DecodePoll, LoadCompletion, ModelLoader};
pub use crate::presentation::{present, PlacementControl, Presentation};
pub use crate::reticle::{FocusReticle, TrackingState};
pub use crate::session::SessionConfig;
