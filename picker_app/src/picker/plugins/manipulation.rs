// picker_app/src/picker/plugins/manipulation.rs

//! Manipulation of placed content. Dragging an anchor slides it over its
//! surface. Q/E twists and the mouse wheel scales the last anchor grabbed,
//! unless the cursor is over the picker bar.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::ui::RelativeCursorPosition;

use crate::picker::plugins::scene::BevyArScene;
use crate::picker::plugins::ui::{cursor_over_bar, PickerUiRoot};
use crate::prelude::*;

const TWIST_SPEED: f32 = 1.5;
const SCALE_STEP: f32 = 0.1;
const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 10.0;

/// The gestures an anchor's content responds to.
#[derive(Component, Debug, Clone, Copy)]
pub struct Manipulable(pub GestureSet);

/// The anchor the user last grabbed.
#[derive(Resource, Debug, Default)]
pub struct ManipulationFocus {
    anchor: Option<Entity>,
    /// Anchor position minus the grabbed surface point, kept while dragging.
    grab_offset: Option<Vec3>,
}

pub struct ManipulationPlugin;

impl Plugin for ManipulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ManipulationFocus>().add_systems(
            Update,
            (drag_anchors, twist_and_scale_focused)
                .chain()
                .in_set(PickerSet::Manipulation),
        );
    }
}

/// Where `ray` meets the horizontal plane at `height`.
fn point_at_height(ray: Ray3d, height: f32) -> Option<Vec3> {
    ray.intersect_plane(Vec3::new(0.0, height, 0.0), InfinitePlane3d::new(Vec3::Y))
        .map(|distance| ray.get_point(distance))
}

fn scaled(scale: Vec3, scroll: f32) -> Vec3 {
    (scale * (1.0 + scroll * SCALE_STEP)).clamp(Vec3::splat(MIN_SCALE), Vec3::splat(MAX_SCALE))
}

fn drag_anchors(
    mut drags: EventReader<DragGesture>,
    scene: BevyArScene,
    mut anchors: Query<(&mut Transform, &Manipulable), With<PlacedAnchor>>,
    mut focus: ResMut<ManipulationFocus>,
) {
    for drag in drags.read() {
        match *drag {
            DragGesture::Started(origin) => {
                focus.grab_offset = None;
                let Some(anchor) = scene
                    .hit_test(ScreenPoint::new(origin.x, origin.y))
                    .and_then(|hit| hit.anchor)
                    .map(AnchorId::to_entity)
                else {
                    continue;
                };
                let Ok((transform, _)) = anchors.get(anchor) else {
                    continue;
                };

                focus.anchor = Some(anchor);
                focus.grab_offset = scene
                    .viewport_ray(origin)
                    .and_then(|ray| point_at_height(ray, transform.translation.y))
                    .map(|grabbed| transform.translation - grabbed);
                debug!("[MANIPULATE] Grabbed anchor {:?}.", anchor);
            }
            DragGesture::Moved(position) => {
                let (Some(anchor), Some(offset)) = (focus.anchor, focus.grab_offset) else {
                    continue;
                };
                let Ok((mut transform, manipulable)) = anchors.get_mut(anchor) else {
                    continue;
                };
                if !manipulable.0.translation {
                    continue;
                }
                let height = transform.translation.y;
                if let Some(point) = scene
                    .viewport_ray(position)
                    .and_then(|ray| point_at_height(ray, height))
                {
                    transform.translation = (point + offset).with_y(height);
                }
            }
            DragGesture::Ended => focus.grab_offset = None,
        }
    }
}

fn twist_and_scale_focused(
    keys: Res<ButtonInput<KeyCode>>,
    scroll: Res<AccumulatedMouseScroll>,
    time: Res<Time>,
    bars: Query<&RelativeCursorPosition, With<PickerUiRoot>>,
    mut anchors: Query<(&mut Transform, &Manipulable), With<PlacedAnchor>>,
    mut focus: ResMut<ManipulationFocus>,
) {
    let Some(anchor) = focus.anchor else {
        return;
    };
    let Ok((mut transform, manipulable)) = anchors.get_mut(anchor) else {
        // Removed by a long-press.
        *focus = ManipulationFocus::default();
        return;
    };

    if manipulable.0.rotation {
        let mut twist = 0.0;
        if keys.pressed(KeyCode::KeyQ) {
            twist += TWIST_SPEED;
        }
        if keys.pressed(KeyCode::KeyE) {
            twist -= TWIST_SPEED;
        }
        if twist != 0.0 {
            transform.rotate_y(twist * time.delta_secs());
        }
    }

    // Over the bar the wheel scrolls the thumbnail strip instead.
    if manipulable.0.scale && scroll.delta.y != 0.0 && !cursor_over_bar(&bars) {
        transform.scale = scaled(transform.scale, scroll.delta.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_meets_the_surface_height() {
        let ray = Ray3d::new(Vec3::new(0.0, 2.0, 0.0), Dir3::new(Vec3::new(1.0, -1.0, 0.0)).unwrap());
        let point = point_at_height(ray, 0.0).unwrap();
        assert_relative_eq!(point.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-5);

        let upward = Ray3d::new(Vec3::ZERO, Dir3::Y);
        assert!(point_at_height(upward, -1.0).is_none());
    }

    #[test]
    fn scroll_scales_within_limits() {
        assert_relative_eq!(scaled(Vec3::ONE, 1.0).x, 1.1, epsilon = 1e-6);
        assert_eq!(scaled(Vec3::splat(9.9), 5.0), Vec3::splat(MAX_SCALE));
        assert_eq!(scaled(Vec3::splat(0.1), -5.0), Vec3::splat(MIN_SCALE));
    }
}
