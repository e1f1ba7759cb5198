// picker_app/src/picker/core/events.rs
use bevy::prelude::{Event, Vec2};
use picker_core::presentation::PlacementControl;

/// A thumbnail in the strip was tapped. Holds the catalog index.
#[derive(Event, Debug, Clone, Copy)]
pub struct ThumbnailTapped(pub usize);

/// One of the cancel/confirm/delete controls was pressed.
#[derive(Event, Debug, Clone, Copy)]
pub struct ControlPressed(pub PlacementControl);

/// The live view was held without moving. Holds the viewport position.
#[derive(Event, Debug, Clone, Copy)]
pub struct LongPressed(pub Vec2);

/// A press on the live view that moved past the long-press slop.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// Holds the viewport position where the press began.
    Started(Vec2),
    Moved(Vec2),
    Ended,
}
