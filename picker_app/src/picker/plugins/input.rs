// picker_app/src/picker/plugins/input.rs

//! Turns the raw primary pointer (left mouse button or first touch) into
//! long-press and drag events on the live view. Presses that begin on a UI
//! node belong to the UI and are not tracked.

use bevy::window::PrimaryWindow;
use picker_core::config::SceneConfig;

use crate::prelude::*;

/// The primary pointer while it is down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub just_pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    LongPress(Vec2),
    Drag(DragGesture),
}

/// State of the press currently being tracked, if any.
#[derive(Resource, Debug, Default)]
pub struct PressTracker {
    origin: Option<Vec2>,
    held_secs: f32,
    dragging: bool,
    long_press_sent: bool,
}

impl PressTracker {
    /// Advances the tracker by one frame. `pointer` is `None` once released.
    pub fn step(
        &mut self,
        pointer: Option<PointerSample>,
        over_ui: bool,
        dt: f32,
        scene: &SceneConfig,
    ) -> Vec<PointerGesture> {
        let mut gestures = Vec::new();

        let Some(sample) = pointer else {
            if self.dragging {
                gestures.push(PointerGesture::Drag(DragGesture::Ended));
            }
            *self = PressTracker::default();
            return gestures;
        };

        if sample.just_pressed {
            *self = PressTracker {
                origin: (!over_ui).then_some(sample.position),
                ..default()
            };
            return gestures;
        }

        let Some(origin) = self.origin else {
            return gestures;
        };
        self.held_secs += dt;

        if !self.dragging && sample.position.distance(origin) > scene.long_press_slop_px {
            self.dragging = true;
            gestures.push(PointerGesture::Drag(DragGesture::Started(origin)));
        }

        if self.dragging {
            gestures.push(PointerGesture::Drag(DragGesture::Moved(sample.position)));
        } else if !self.long_press_sent && self.held_secs >= scene.long_press_secs {
            self.long_press_sent = true;
            gestures.push(PointerGesture::LongPress(origin));
        }
        gestures
    }
}

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PressTracker>()
            .add_systems(Update, track_primary_pointer.in_set(PickerSet::Input));
    }
}

fn primary_pointer(
    mouse: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: Option<&Window>,
) -> Option<PointerSample> {
    if mouse.pressed(MouseButton::Left) {
        if let Some(position) = window.and_then(Window::cursor_position) {
            return Some(PointerSample {
                position,
                just_pressed: mouse.just_pressed(MouseButton::Left),
            });
        }
    }

    touches.iter().next().map(|touch| PointerSample {
        position: touch.position(),
        just_pressed: touches.just_pressed(touch.id()),
    })
}

fn track_primary_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_nodes: Query<&Interaction>,
    settings: Res<PickerSettings>,
    time: Res<Time>,
    mut tracker: ResMut<PressTracker>,
    mut long_presses: EventWriter<LongPressed>,
    mut drags: EventWriter<DragGesture>,
) {
    let pointer = primary_pointer(&mouse, &touches, windows.single().ok());
    let over_ui = ui_nodes
        .iter()
        .any(|interaction| *interaction != Interaction::None);

    for gesture in tracker.step(pointer, over_ui, time.delta_secs(), &settings.0.scene) {
        match gesture {
            PointerGesture::LongPress(position) => {
                long_presses.write(LongPressed(position));
            }
            PointerGesture::Drag(drag) => {
                drags.write(drag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, y: f32) -> Option<PointerSample> {
        Some(PointerSample {
            position: Vec2::new(x, y),
            just_pressed: true,
        })
    }

    fn held(x: f32, y: f32) -> Option<PointerSample> {
        Some(PointerSample {
            position: Vec2::new(x, y),
            just_pressed: false,
        })
    }

    #[test]
    fn holding_still_fires_one_long_press() {
        let scene = SceneConfig::default();
        let mut tracker = PressTracker::default();

        assert!(tracker.step(down(100.0, 100.0), false, 0.0, &scene).is_empty());
        assert!(tracker.step(held(101.0, 100.0), false, 0.3, &scene).is_empty());
        assert_eq!(
            tracker.step(held(101.0, 100.0), false, 0.3, &scene),
            vec![PointerGesture::LongPress(Vec2::new(100.0, 100.0))]
        );
        assert!(tracker.step(held(101.0, 100.0), false, 0.3, &scene).is_empty());
        assert!(tracker.step(None, false, 0.0, &scene).is_empty());
    }

    #[test]
    fn moving_past_slop_becomes_a_drag() {
        let scene = SceneConfig::default();
        let mut tracker = PressTracker::default();

        tracker.step(down(0.0, 0.0), false, 0.0, &scene);
        assert_eq!(
            tracker.step(held(30.0, 0.0), false, 0.1, &scene),
            vec![
                PointerGesture::Drag(DragGesture::Started(Vec2::ZERO)),
                PointerGesture::Drag(DragGesture::Moved(Vec2::new(30.0, 0.0))),
            ]
        );
        // A drag never turns into a long-press.
        assert_eq!(
            tracker.step(held(30.0, 0.0), false, 1.0, &scene),
            vec![PointerGesture::Drag(DragGesture::Moved(Vec2::new(30.0, 0.0)))]
        );
        assert_eq!(
            tracker.step(None, false, 0.0, &scene),
            vec![PointerGesture::Drag(DragGesture::Ended)]
        );
    }

    #[test]
    fn presses_that_start_on_the_ui_are_ignored() {
        let scene = SceneConfig::default();
        let mut tracker = PressTracker::default();

        tracker.step(down(10.0, 10.0), true, 0.0, &scene);
        assert!(tracker.step(held(10.0, 10.0), false, 2.0, &scene).is_empty());
        assert!(tracker.step(held(90.0, 10.0), false, 0.1, &scene).is_empty());
    }
}
