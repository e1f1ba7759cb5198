// picker_app/src/picker/plugins/session.rs

//! Stands in for the tracked world: a device camera, lighting, and the
//! planes the session "detects" according to `SessionConfig`.

use avian3d::prelude::*;
use picker_core::session::{start_session, EnvironmentTexturing, SceneReconstruction};

use crate::prelude::*;

/// A surface the session detected. The reticle only rests on these.
#[derive(Component)]
pub struct DetectedPlane;

const FLOOR_SIZE: f32 = 20.0;
const WALL_SIZE: Vec2 = Vec2::new(20.0, 8.0);
const WALL_DISTANCE: f32 = 8.0;
const CAMERA_SPEED: f32 = 2.0;
const CAMERA_TURN_SPEED: f32 = 1.2;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::AssetLoading),
            (spawn_device_camera, run_tracking_session),
        )
        .add_systems(Update, move_device_camera.in_set(PickerSet::Input));
    }
}

/// The session collaborator backed by Bevy's world and avian colliders.
struct BevySession<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
}

impl BevySession<'_, '_, '_> {
    fn spawn_plane(
        &mut self,
        name: &str,
        mesh: Mesh,
        transform: Transform,
        box_collider: Collider,
        reconstruction: SceneReconstruction,
    ) {
        let mut plane = self.commands.spawn((
            Name::new(name.to_string()),
            DetectedPlane,
            Mesh3d(self.meshes.add(mesh)),
            MeshMaterial3d(self.materials.add(Color::srgb(0.35, 0.38, 0.42))),
            transform,
            RigidBody::Static,
        ));
        match reconstruction {
            // Collide with the actual surface geometry.
            SceneReconstruction::Mesh => {
                plane.insert(ColliderConstructor::TrimeshFromMesh);
            }
            SceneReconstruction::None => {
                plane.insert(box_collider);
            }
        }
    }
}

impl ArSession for BevySession<'_, '_, '_> {
    fn supports_mesh_reconstruction(&self) -> bool {
        // avian can build trimesh colliders from any render mesh.
        true
    }

    fn run(&mut self, config: &SessionConfig) {
        if config.plane_detection.detects_horizontal() {
            self.spawn_plane(
                "Detected floor",
                Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE).build(),
                Transform::IDENTITY,
                Collider::cuboid(FLOOR_SIZE, 0.01, FLOOR_SIZE),
                config.scene_reconstruction,
            );
        }

        if config.plane_detection.detects_vertical() {
            self.spawn_plane(
                "Detected wall",
                Plane3d::new(Vec3::Z, WALL_SIZE / 2.0).mesh().build(),
                Transform::from_xyz(0.0, WALL_SIZE.y / 2.0, -WALL_DISTANCE),
                Collider::cuboid(WALL_SIZE.x, WALL_SIZE.y, 0.01),
                config.scene_reconstruction,
            );
        }

        let brightness = match config.environment_texturing {
            EnvironmentTexturing::Automatic => 500.0,
            EnvironmentTexturing::None => 80.0,
        };
        self.commands.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness,
            ..default()
        });
    }
}

fn spawn_device_camera(mut commands: Commands) {
    commands.spawn(DirectionalLight {
        shadows_enabled: true,
        illuminance: 8_000.0,
        ..default()
    });

    // Roughly where a phone is held: eye height, looking down at the floor.
    commands.spawn((
        Name::new("Device camera"),
        PickerCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.5, 3.0).looking_at(Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
    ));
}

fn run_tracking_session(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<PickerSettings>,
) {
    let mut session = BevySession {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    start_session(&mut session, settings.0.session);
}

/// Moves the device camera with WASD and turns it with the arrow keys.
fn move_device_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut cameras: Query<&mut Transform, With<PickerCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    let forward = transform.forward().with_y(0.0).normalize_or_zero();
    let right = transform.right().with_y(0.0).normalize_or_zero();
    let mut motion = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        motion += forward;
    }
    if keys.pressed(KeyCode::KeyS) {
        motion -= forward;
    }
    if keys.pressed(KeyCode::KeyD) {
        motion += right;
    }
    if keys.pressed(KeyCode::KeyA) {
        motion -= right;
    }
    transform.translation += motion.normalize_or_zero() * CAMERA_SPEED * dt;

    let mut yaw = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        yaw += CAMERA_TURN_SPEED * dt;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        yaw -= CAMERA_TURN_SPEED * dt;
    }
    if yaw != 0.0 {
        transform.rotate_y(yaw);
    }
}
