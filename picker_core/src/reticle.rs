// picker_core/src/reticle.rs

//! Tracking state of the placement reticle. The reticle sits on whatever
//! surface is under the screen center; with no surface it is initializing.

use crate::types::SurfacePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    Initializing,
    Tracking,
}

#[derive(Debug, Clone, Default)]
pub struct FocusReticle {
    state: TrackingState,
    position: Option<SurfacePoint>,
}

impl FocusReticle {
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Last surface point the reticle rested on.
    pub fn position(&self) -> Option<SurfacePoint> {
        self.position
    }

    /// Feeds the latest center-of-screen surface hit. Returns the new state
    /// when it changed.
    pub fn update(&mut self, surface_hit: Option<SurfacePoint>) -> Option<TrackingState> {
        let next = match surface_hit {
            Some(point) => {
                self.position = Some(point);
                TrackingState::Tracking
            }
            None => TrackingState::Initializing,
        };

        if next == self.state {
            return None;
        }
        // Callers log the transition.
        self.state = next;
        Some(next)
    }
}
