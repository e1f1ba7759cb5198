// picker_app/src/picker/plugins/reticle.rs

use avian3d::prelude::{SpatialQuery, SpatialQueryFilter};
use std::f32::consts::FRAC_PI_2;

use crate::picker::plugins::session::DetectedPlane;
use crate::prelude::*;

const MAX_SURFACE_DISTANCE: f32 = 50.0;
const RETICLE_RADIUS: f32 = 0.15;

/// The placement reticle. New anchors are created where it rests.
#[derive(Resource, Default)]
pub struct Reticle(pub FocusReticle);

pub struct ReticlePlugin;

impl Plugin for ReticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Reticle>().add_systems(
            Update,
            (
                // Must be current before the gateway places anything.
                update_reticle.in_set(PickerSet::Input),
                draw_reticle.in_set(PickerSet::Present),
            ),
        );
    }
}

/// Casts a ray through the center of the view onto the detected planes.
fn update_reticle(
    spatial_query: SpatialQuery,
    cameras: Query<(&Camera, &GlobalTransform), With<PickerCamera>>,
    planes: Query<(), With<DetectedPlane>>,
    mut reticle: ResMut<Reticle>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let surface = camera
        .logical_viewport_size()
        .and_then(|size| camera.viewport_to_world(camera_transform, size / 2.0).ok())
        .and_then(|ray| {
            spatial_query
                .cast_ray_predicate(
                    ray.origin,
                    ray.direction,
                    MAX_SURFACE_DISTANCE,
                    true,
                    &SpatialQueryFilter::default(),
                    &|entity| planes.contains(entity),
                )
                .map(|hit| ray.get_point(hit.distance))
        });

    let surface = surface.map(|p| SurfacePoint::new(p.x, p.y, p.z));
    match reticle.0.update(surface) {
        Some(TrackingState::Tracking) => info!("tracking"),
        Some(TrackingState::Initializing) => info!("Initializing"),
        None => {}
    }
}

fn draw_reticle(mut gizmos: Gizmos, reticle: Res<Reticle>, controller: Res<Controller>) {
    if !controller.0.state().placement_mode_active() {
        return;
    }
    let Some(position) = reticle.0.position() else {
        return;
    };

    let color = match reticle.0.state() {
        TrackingState::Tracking => Color::srgb(1.0, 0.85, 0.1),
        TrackingState::Initializing => Color::srgba(1.0, 1.0, 1.0, 0.4),
    };
    // Circles are drawn in the XY plane; lay it flat on the surface.
    gizmos.circle(
        Isometry3d::new(
            Vec3::new(position.x, position.y, position.z),
            Quat::from_rotation_x(FRAC_PI_2),
        ),
        RETICLE_RADIUS,
        color,
    );
}
