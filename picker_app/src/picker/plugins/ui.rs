// picker_app/src/picker/plugins/ui.rs

//! The presentation shell: a bottom bar that shows either the thumbnail
//! strip or the cancel/place/delete row, rebuilt whenever `present` changes.
//! The strip scrolls sideways with the mouse wheel while the cursor is over it.

use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::ui::RelativeCursorPosition;

use crate::prelude::*;

const BAR_HEIGHT: f32 = 120.0;
const THUMBNAIL_SIZE: f32 = 96.0;
const THUMBNAIL_MARGIN: f32 = 6.0;
const CONTROL_WIDTH: f32 = 110.0;
const CONTROL_MARGIN: f32 = 12.0;
/// Pixels scrolled per wheel notch on line-based wheels.
const SCROLL_LINE_PX: f32 = 40.0;
const BAR_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.45);
const CONTROL_COLOR: Color = Color::srgb(0.18, 0.18, 0.22);
const CONTROL_HOVERED_COLOR: Color = Color::srgb(0.3, 0.3, 0.38);

/// The bar every presentation is drawn into.
#[derive(Component)]
pub struct PickerUiRoot;

/// A tile of the thumbnail strip. Holds the catalog index.
#[derive(Component, Debug, Clone, Copy)]
pub struct ThumbnailButton(pub usize);

#[derive(Component, Debug, Clone, Copy)]
pub struct ControlButton(pub PlacementControl);

/// What the bar currently shows.
#[derive(Resource, Default)]
struct ShownPresentation(Option<Presentation>);

pub struct PickerUiPlugin;

impl Plugin for PickerUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShownPresentation>()
            .add_systems(OnEnter(AppState::Running), spawn_ui_root)
            .add_systems(
                Update,
                (
                    (emit_button_events, scroll_thumbnail_strip).in_set(PickerSet::Input),
                    (refresh_bar, highlight_controls).in_set(PickerSet::Present),
                ),
            );
    }
}

fn spawn_ui_root(mut commands: Commands) {
    commands.spawn((
        Name::new("Picker bar"),
        PickerUiRoot,
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Px(BAR_HEIGHT),
            flex_direction: FlexDirection::Row,
            // Overflow must start at the left edge to be reachable by scrolling.
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Center,
            overflow: Overflow::scroll_x(),
            ..default()
        },
        ScrollPosition::default(),
        BackgroundColor(BAR_COLOR),
        // Presses on the bar background belong to the UI, not the scene.
        Interaction::default(),
        RelativeCursorPosition::default(),
    ));
}

/// Width the bar's children take up, in logical pixels.
fn content_width(presentation: &Presentation) -> f32 {
    match presentation {
        Presentation::ThumbnailStrip(tiles) => {
            tiles.len() as f32 * (THUMBNAIL_SIZE + 2.0 * THUMBNAIL_MARGIN)
        }
        Presentation::PlacementControls { controls, .. } => {
            controls.len() as f32 * (CONTROL_WIDTH + 2.0 * CONTROL_MARGIN)
        }
    }
}

/// New horizontal scroll offset after scrolling `delta` pixels, kept within
/// the part of the content that overflows the view.
fn clamp_scroll(offset: f32, delta: f32, content: f32, view: f32) -> f32 {
    let max_offset = (content - view).max(0.0);
    (offset + delta).clamp(0.0, max_offset)
}

/// True while the cursor is over the picker bar.
pub fn cursor_over_bar(bars: &Query<&RelativeCursorPosition, With<PickerUiRoot>>) -> bool {
    bars.iter().any(RelativeCursorPosition::mouse_over)
}

fn scroll_thumbnail_strip(
    scroll: Res<AccumulatedMouseScroll>,
    shown: Res<ShownPresentation>,
    mut bars: Query<
        (&mut ScrollPosition, &ComputedNode, &RelativeCursorPosition),
        With<PickerUiRoot>,
    >,
) {
    let Ok((mut position, node, cursor)) = bars.single_mut() else {
        return;
    };
    let content = shown.0.as_ref().map(content_width).unwrap_or(0.0);
    let view = node.size().x * node.inverse_scale_factor();

    let delta = if cursor.mouse_over() {
        // Either wheel axis scrolls the strip; vertical wheels are the common case.
        let raw = if scroll.delta.x != 0.0 {
            scroll.delta.x
        } else {
            scroll.delta.y
        };
        match scroll.unit {
            MouseScrollUnit::Line => -raw * SCROLL_LINE_PX,
            MouseScrollUnit::Pixel => -raw,
        }
    } else {
        0.0
    };

    // Re-clamped every frame so a shorter presentation never shows blank space.
    let offset = clamp_scroll(position.offset_x, delta, content, view);
    if offset != position.offset_x {
        position.offset_x = offset;
    }
}

fn tile_tint(status: LoadStatus) -> Color {
    match status {
        LoadStatus::Loaded => Color::WHITE,
        LoadStatus::Pending => Color::srgba(1.0, 1.0, 1.0, 0.4),
        LoadStatus::Failed => Color::srgba(1.0, 0.4, 0.4, 0.6),
    }
}

/// Rebuilds the bar's children when the presentation changes. Load
/// completions change tile status, so they trigger a rebuild too.
fn refresh_bar(
    mut commands: Commands,
    controller: Res<Controller>,
    catalog: Res<ModelCatalog>,
    settings: Res<PickerSettings>,
    asset_server: Res<AssetServer>,
    roots: Query<Entity, With<PickerUiRoot>>,
    mut shown: ResMut<ShownPresentation>,
) {
    let Ok(root) = roots.single() else {
        return;
    };
    let presentation = present(controller.0.state(), &catalog.0);
    if shown.0.as_ref() == Some(&presentation) {
        return;
    }

    let thumbnails_dir = &settings.0.catalog.thumbnails_dir;
    commands
        .entity(root)
        .despawn_related::<Children>()
        .with_children(|bar| match &presentation {
            Presentation::ThumbnailStrip(tiles) if tiles.is_empty() => {
                bar.spawn((
                    Text::new("No models available"),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
            Presentation::ThumbnailStrip(tiles) => {
                for tile in tiles {
                    let path = format!("{}/{}.png", thumbnails_dir, tile.thumbnail.image_name);
                    bar.spawn((
                        Name::new(tile.identifier.clone()),
                        Button,
                        ThumbnailButton(tile.index),
                        Node {
                            width: Val::Px(THUMBNAIL_SIZE),
                            height: Val::Px(THUMBNAIL_SIZE),
                            margin: UiRect::horizontal(Val::Px(THUMBNAIL_MARGIN)),
                            flex_shrink: 0.0,
                            ..default()
                        },
                        ImageNode::new(asset_server.load(path)).with_color(tile_tint(tile.status)),
                        BorderRadius::all(Val::Px(12.0)),
                    ));
                }
            }
            Presentation::PlacementControls { controls, .. } => {
                for control in controls {
                    bar.spawn((
                        Button,
                        ControlButton(*control),
                        Node {
                            width: Val::Px(CONTROL_WIDTH),
                            height: Val::Px(48.0),
                            margin: UiRect::horizontal(Val::Px(CONTROL_MARGIN)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(CONTROL_COLOR),
                        BorderRadius::all(Val::Px(24.0)),
                    ))
                    .with_child((
                        Text::new(control.label()),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                }
            }
        });

    if let Presentation::PlacementControls { model, .. } = &presentation {
        debug!("[UI] Showing placement controls for '{}'.", model);
    }
    shown.0 = Some(presentation);
}

fn emit_button_events(
    buttons: Query<
        (&Interaction, Option<&ThumbnailButton>, Option<&ControlButton>),
        (Changed<Interaction>, With<Button>),
    >,
    mut taps: EventWriter<ThumbnailTapped>,
    mut presses: EventWriter<ControlPressed>,
) {
    for (interaction, thumbnail, control) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Some(ThumbnailButton(index)) = thumbnail {
            taps.write(ThumbnailTapped(*index));
        }
        if let Some(ControlButton(control)) = control {
            presses.write(ControlPressed(*control));
        }
    }
}

fn highlight_controls(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<ControlButton>)>,
) {
    for (interaction, mut color) in &mut buttons {
        color.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => CONTROL_HOVERED_COLOR,
            Interaction::None => CONTROL_COLOR,
        };
    }
}
