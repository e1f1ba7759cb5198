// picker_app/src/picker/plugins/interaction.rs

use crate::prelude::*;

/// Feeds thumbnail taps and control presses into the placement controller.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_thumbnail_taps, apply_control_presses)
                .chain()
                .in_set(PickerSet::Interaction),
        );
    }
}

fn apply_thumbnail_taps(
    mut taps: EventReader<ThumbnailTapped>,
    catalog: Res<ModelCatalog>,
    mut controller: ResMut<Controller>,
) {
    for ThumbnailTapped(index) in taps.read() {
        if !controller.0.select_index(&catalog.0, *index) {
            debug!("[PICKER] Ignored tap on thumbnail {}.", index);
        }
    }
}

fn apply_control_presses(
    mut presses: EventReader<ControlPressed>,
    mut controller: ResMut<Controller>,
) {
    for ControlPressed(control) in presses.read() {
        let applied = match control {
            PlacementControl::Cancel => controller.0.cancel(),
            PlacementControl::Confirm => controller.0.confirm_place(),
            PlacementControl::Delete => controller.0.confirm_delete(),
        };
        if !applied {
            debug!(
                "[PICKER] {} pressed outside placement mode, ignored.",
                control.label()
            );
        }
    }
}
