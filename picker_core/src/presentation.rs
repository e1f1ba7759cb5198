// picker_core/src/presentation.rs

use crate::catalog::Catalog;
use crate::interaction::InteractionState;
use crate::model::{LoadStatus, Thumbnail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementControl {
    Cancel,
    Confirm,
    Delete,
}

impl PlacementControl {
    /// Left-to-right order of the control row.
    pub const ROW: [PlacementControl; 3] = [
        PlacementControl::Cancel,
        PlacementControl::Confirm,
        PlacementControl::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlacementControl::Cancel => "Cancel",
            PlacementControl::Confirm => "Place",
            PlacementControl::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailTile {
    pub index: usize,
    pub identifier: String,
    pub thumbnail: Thumbnail,
    pub status: LoadStatus,
}

/// What the shell should show for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    ThumbnailStrip(Vec<ThumbnailTile>),
    PlacementControls {
        model: String,
        controls: [PlacementControl; 3],
    },
}

/// Maps the interaction state to the view. Owns nothing.
pub fn present<H>(state: &InteractionState<H>, catalog: &Catalog<H>) -> Presentation {
    match state.selected_model() {
        Some(model) => Presentation::PlacementControls {
            model: model.identifier().to_string(),
            controls: PlacementControl::ROW,
        },
        None => Presentation::ThumbnailStrip(
            catalog
                .records()
                .iter()
                .enumerate()
                .map(|(index, record)| ThumbnailTile {
                    index,
                    identifier: record.identifier().to_string(),
                    thumbnail: record.thumbnail().clone(),
                    status: record.load_status(),
                })
                .collect(),
        ),
    }
}
