// picker_core/src/interaction.rs

//! The selection/placement state machine.
//!
//! `Idle` shows the thumbnail strip. Selecting a model moves to `Placing`,
//! which shows the cancel/confirm/delete controls. Every control returns to
//! `Idle`; confirming additionally raises a one-shot `PlacementRequest` for
//! the scene gateway.

use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::model::ModelRecord;

// =========================================================================
// == Requests & One-Shot Signal ==
// =========================================================================

/// What the user confirmed in the placement controls.
pub enum PlacementRequest<H> {
    Place(Arc<ModelRecord<H>>),
    Delete(Arc<ModelRecord<H>>),
}

impl<H> PlacementRequest<H> {
    pub fn model(&self) -> &Arc<ModelRecord<H>> {
        match self {
            PlacementRequest::Place(model) | PlacementRequest::Delete(model) => model,
        }
    }
}

impl<H> Clone for PlacementRequest<H> {
    fn clone(&self) -> Self {
        match self {
            PlacementRequest::Place(model) => PlacementRequest::Place(Arc::clone(model)),
            PlacementRequest::Delete(model) => PlacementRequest::Delete(Arc::clone(model)),
        }
    }
}

impl<H> fmt::Debug for PlacementRequest<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRequest::Place(model) => write!(f, "Place({})", model.identifier()),
            PlacementRequest::Delete(model) => write!(f, "Delete({})", model.identifier()),
        }
    }
}

/// A request that is acted on once, then cleared on a later tick.
///
/// `observe` hands the request out the first time only. `finish_tick` drops
/// a request that has been observed; it must run after the observation pass,
/// never inside it.
pub enum PendingSignal<H> {
    Empty,
    Fresh(PlacementRequest<H>),
    Consumed(PlacementRequest<H>),
}

impl<H> Default for PendingSignal<H> {
    fn default() -> Self {
        PendingSignal::Empty
    }
}

impl<H> PendingSignal<H> {
    /// Holds `request` until it is observed. A request that was never
    /// observed is replaced, and the replacement is logged.
    pub fn raise(&mut self, request: PlacementRequest<H>) {
        if let PendingSignal::Fresh(unobserved) = self {
            tracing::debug!(
                "Replacing unobserved request {:?} with {:?}.",
                unobserved,
                request
            );
        }
        *self = PendingSignal::Fresh(request);
    }

    pub fn observe(&mut self) -> Option<PlacementRequest<H>> {
        match std::mem::take(self) {
            PendingSignal::Fresh(request) => {
                *self = PendingSignal::Consumed(request.clone());
                Some(request)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn finish_tick(&mut self) {
        if matches!(self, PendingSignal::Consumed(_)) {
            *self = PendingSignal::Empty;
        }
    }

    /// The request currently held, observed or not.
    pub fn peek(&self) -> Option<&PlacementRequest<H>> {
        match self {
            PendingSignal::Empty => None,
            PendingSignal::Fresh(request) | PendingSignal::Consumed(request) => Some(request),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PendingSignal::Empty)
    }
}

// =========================================================================
// == Interaction State ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// No model selected, thumbnail strip shown.
    Idle,
    /// A model is selected, placement controls shown.
    Placing,
}

/// The single authoritative interaction state.
///
/// Placement mode is derived from the selection, so "placement mode active"
/// and "a model is selected" can never disagree.
pub struct InteractionState<H> {
    selected: Option<Arc<ModelRecord<H>>>,
    pending: PendingSignal<H>,
}

impl<H> Default for InteractionState<H> {
    fn default() -> Self {
        Self {
            selected: None,
            pending: PendingSignal::Empty,
        }
    }
}

impl<H> InteractionState<H> {
    pub fn mode(&self) -> InteractionMode {
        if self.selected.is_some() {
            InteractionMode::Placing
        } else {
            InteractionMode::Idle
        }
    }

    pub fn placement_mode_active(&self) -> bool {
        self.mode() == InteractionMode::Placing
    }

    pub fn selected_model(&self) -> Option<&Arc<ModelRecord<H>>> {
        self.selected.as_ref()
    }

    pub fn pending(&self) -> &PendingSignal<H> {
        &self.pending
    }
}

impl<H> fmt::Debug for InteractionState<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionState")
            .field("mode", &self.mode())
            .field("selected", &self.selected.as_ref().map(|m| m.identifier()))
            .field("pending", &self.pending.peek())
            .finish()
    }
}

// =========================================================================
// == Controller ==
// =========================================================================

/// Owns the `InteractionState` and applies the transitions to it.
pub struct PlacementController<H> {
    state: InteractionState<H>,
}

impl<H> Default for PlacementController<H> {
    fn default() -> Self {
        Self {
            state: InteractionState::default(),
        }
    }
}

impl<H> PlacementController<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState<H> {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode()
    }

    /// `Idle -> Placing`. Ignored while already placing.
    pub fn select_model(&mut self, model: Arc<ModelRecord<H>>) -> bool {
        if self.state.placement_mode_active() {
            tracing::debug!(
                "Ignoring selection of '{}' while placing.",
                model.identifier()
            );
            return false;
        }
        tracing::info!("Selected model '{}'.", model.identifier());
        self.state.selected = Some(model);
        true
    }

    /// Selects the model at `index` of the thumbnail strip.
    pub fn select_index(&mut self, catalog: &Catalog<H>, index: usize) -> bool {
        match catalog.get(index) {
            Some(model) => self.select_model(Arc::clone(model)),
            None => {
                tracing::warn!(
                    "Tap on thumbnail {} but the catalog only has {} model(s).",
                    index,
                    catalog.len()
                );
                false
            }
        }
    }

    /// `Placing -> Idle`, no scene effect.
    pub fn cancel(&mut self) -> bool {
        if self.take_selection().is_none() {
            return false;
        }
        tracing::info!("Model placement cancelled.");
        true
    }

    /// `Placing -> Idle`, raising `Place(selected)`.
    pub fn confirm_place(&mut self) -> bool {
        let Some(model) = self.take_selection() else {
            return false;
        };
        tracing::info!("Model placement confirmed for '{}'.", model.identifier());
        self.state.pending.raise(PlacementRequest::Place(model));
        true
    }

    /// `Placing -> Idle`, raising `Delete(selected)`.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(model) = self.take_selection() else {
            return false;
        };
        tracing::info!("Model delete confirmed for '{}'.", model.identifier());
        self.state.pending.raise(PlacementRequest::Delete(model));
        true
    }

    /// Hands out the pending request the first time it is observed.
    pub fn observe_request(&mut self) -> Option<PlacementRequest<H>> {
        self.state.pending.observe()
    }

    /// Clears a request that was observed this tick.
    pub fn finish_tick(&mut self) {
        self.state.pending.finish_tick();
    }

    fn take_selection(&mut self) -> Option<Arc<ModelRecord<H>>> {
        self.state.selected.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Thumbnail;

    fn record(name: &str) -> Arc<ModelRecord<u32>> {
        Arc::new(ModelRecord::new(
            name,
            Thumbnail {
                image_name: name.to_string(),
                is_fallback: false,
            },
        ))
    }

    fn snapshot(controller: &PlacementController<u32>) -> (InteractionMode, Option<String>, bool) {
        let state = controller.state();
        (
            state.mode(),
            state.selected_model().map(|m| m.identifier().to_string()),
            state.pending().is_empty(),
        )
    }

    #[test]
    fn select_then_cancel_restores_state() {
        let mut controller = PlacementController::new();
        let before = snapshot(&controller);

        assert!(controller.select_model(record("teapot")));
        assert!(controller.state().placement_mode_active());
        assert!(controller.cancel());

        assert_eq!(snapshot(&controller), before);
    }

    #[test]
    fn select_index_picks_catalog_entry() {
        struct NoImages;
        impl crate::catalog::ImageStore for NoImages {
            fn contains(&self, _name: &str) -> bool {
                false
            }
        }
        let catalog: Catalog<u32> =
            Catalog::from_identifiers(["teapot", "toy_robot_vintage"], &NoImages, "teapot");
        let mut controller = PlacementController::new();

        assert!(!controller.select_index(&catalog, 5));
        assert_eq!(controller.mode(), InteractionMode::Idle);

        assert!(controller.select_index(&catalog, 0));
        let selected = controller.state().selected_model().unwrap();
        assert_eq!(selected.identifier(), "teapot");
        assert!(controller.state().placement_mode_active());
    }

    #[test]
    fn selecting_while_placing_is_ignored() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        assert!(!controller.select_model(record("toy_biplane")));
        assert_eq!(
            controller.state().selected_model().unwrap().identifier(),
            "teapot"
        );
    }

    #[test]
    fn controls_outside_placing_are_noops() {
        let mut controller: PlacementController<u32> = PlacementController::new();
        assert!(!controller.cancel());
        assert!(!controller.confirm_place());
        assert!(!controller.confirm_delete());
        assert!(controller.state().pending().is_empty());
        assert_eq!(controller.mode(), InteractionMode::Idle);
    }

    #[test]
    fn confirm_place_raises_place_and_resets() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        assert!(controller.confirm_place());

        assert_eq!(controller.mode(), InteractionMode::Idle);
        assert!(controller.state().selected_model().is_none());
        assert!(matches!(
            controller.state().pending().peek(),
            Some(PlacementRequest::Place(m)) if m.identifier() == "teapot"
        ));
    }

    #[test]
    fn confirm_delete_raises_delete() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        assert!(controller.confirm_delete());
        assert!(matches!(
            controller.observe_request(),
            Some(PlacementRequest::Delete(_))
        ));
        assert!(!controller.state().placement_mode_active());
    }

    #[test]
    fn request_is_observed_once_and_cleared_after_tick() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        controller.confirm_place();

        assert!(controller.observe_request().is_some());
        // Same tick, later observers see nothing.
        assert!(controller.observe_request().is_none());
        assert!(!controller.state().pending().is_empty());

        controller.finish_tick();
        assert!(controller.state().pending().is_empty());
        assert!(controller.observe_request().is_none());
    }

    #[test]
    fn unobserved_request_survives_finish_tick() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        controller.confirm_place();

        controller.finish_tick();
        assert!(controller.observe_request().is_some());
    }

    #[test]
    fn second_confirm_before_observation_keeps_the_latest() {
        let mut controller = PlacementController::new();
        controller.select_model(record("teapot"));
        controller.confirm_place();
        controller.select_model(record("toy_robot_vintage"));
        controller.confirm_delete();

        assert!(matches!(
            controller.observe_request(),
            Some(PlacementRequest::Delete(m)) if m.identifier() == "toy_robot_vintage"
        ));
        assert!(controller.observe_request().is_none());
    }
}
