// picker_core/src/gateway.rs

//! The scene attachment gateway: the only place where placement requests
//! and long-presses turn into scene mutations.

use crate::error::PickerError;
use crate::interaction::{PlacementController, PlacementRequest};
use crate::types::{AnchorId, ScreenPoint};

// =========================================================================
// == Scene Collaborator ==
// =========================================================================

/// The manipulation gestures a placed entity responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureSet {
    pub translation: bool,
    pub rotation: bool,
    pub scale: bool,
}

impl GestureSet {
    pub const ALL: GestureSet = GestureSet {
        translation: true,
        rotation: true,
        scale: true,
    };
}

/// What a hit test found under a screen point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHit {
    /// The anchor the hit entity is attached under, if any.
    pub anchor: Option<AnchorId>,
    /// That anchor's name.
    pub anchor_name: Option<String>,
}

/// The live AR scene.
pub trait ArScene {
    type Handle;

    /// Builds collision volumes for `handle`, over its sub-parts when
    /// `recursive` is set.
    fn generate_collision(&mut self, handle: &Self::Handle, recursive: bool);

    fn install_gestures(&mut self, handle: &Self::Handle, gestures: GestureSet);

    /// Creates an anchor named `name` on any detected plane, attaches
    /// `handle` under it and inserts it into the scene.
    fn add_anchor(&mut self, name: &str, handle: &Self::Handle) -> AnchorId;

    fn hit_test(&self, point: ScreenPoint) -> Option<SceneHit>;

    /// Detaches the anchor and everything under it. Returns `false` if the
    /// anchor was not in the scene.
    fn remove_anchor(&mut self, anchor: AnchorId) -> bool;
}

// =========================================================================
// == Gateway ==
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    Placed(AnchorId),
    /// The model has no loaded entity; nothing was touched.
    SkippedNoHandle(PickerError),
    /// Delete confirmations do not remove anything; long-press does.
    DeleteIgnored { identifier: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(AnchorId),
    NothingHit,
    /// Something was hit but it does not belong to a picker anchor.
    NotTagged,
}

#[derive(Debug, Clone)]
pub struct SceneGateway {
    marker: String,
}

impl SceneGateway {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Carries out one placement request.
    pub fn apply<S: ArScene>(
        &self,
        request: &PlacementRequest<S::Handle>,
        scene: &mut S,
    ) -> GatewayOutcome {
        match request {
            PlacementRequest::Place(model) => {
                let Some(handle) = model.entity_handle() else {
                    let error = PickerError::PlacementWithoutHandle {
                        identifier: model.identifier().to_string(),
                    };
                    tracing::warn!("{}", error);
                    return GatewayOutcome::SkippedNoHandle(error);
                };

                tracing::info!("Adding model '{}' to scene.", model.identifier());
                scene.generate_collision(handle, true);
                scene.install_gestures(handle, GestureSet::ALL);
                let anchor = scene.add_anchor(&self.marker, handle);
                GatewayOutcome::Placed(anchor)
            }
            PlacementRequest::Delete(model) => {
                tracing::info!(
                    "Delete confirmed for '{}'; long-press a placed model to remove it.",
                    model.identifier()
                );
                GatewayOutcome::DeleteIgnored {
                    identifier: model.identifier().to_string(),
                }
            }
        }
    }

    /// Observes the controller's one-shot request and applies it. The
    /// controller's `finish_tick` must run later, outside this pass.
    pub fn observe<S: ArScene>(
        &self,
        controller: &mut PlacementController<S::Handle>,
        scene: &mut S,
    ) -> Option<GatewayOutcome> {
        let request = controller.observe_request()?;
        Some(self.apply(&request, scene))
    }

    /// The removal path: detaches the anchor under `point` if it carries the
    /// gateway's marker.
    pub fn handle_long_press<S: ArScene>(&self, point: ScreenPoint, scene: &mut S) -> RemovalOutcome {
        let Some(hit) = scene.hit_test(point) else {
            return RemovalOutcome::NothingHit;
        };

        match (hit.anchor, hit.anchor_name.as_deref()) {
            (Some(anchor), Some(name)) if name == self.marker => {
                if scene.remove_anchor(anchor) {
                    tracing::info!("Removed anchor with name: {}", name);
                    RemovalOutcome::Removed(anchor)
                } else {
                    RemovalOutcome::NothingHit
                }
            }
            _ => RemovalOutcome::NotTagged,
        }
    }
}
