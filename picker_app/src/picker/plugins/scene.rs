// picker_app/src/picker/plugins/scene.rs

//! The live scene as seen by the gateway: anchors are entities named with
//! the gateway's marker, placed content is a `SceneRoot` child of its anchor,
//! and hit tests are avian ray casts from the device camera.

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;

use crate::picker::plugins::manipulation::Manipulable;
use crate::picker::plugins::reticle::Reticle;
use crate::prelude::*;

const MAX_HIT_DISTANCE: f32 = 100.0;

/// Settings the gateway asked for before the anchor exists. They are applied
/// to the content spawned by the next `add_anchor` for the same handle.
#[derive(Default)]
pub struct StagedContent {
    handle: Option<AssetId<Scene>>,
    collision_recursive: Option<bool>,
    gestures: Option<GestureSet>,
}

impl StagedContent {
    fn stage(&mut self, handle: &SceneHandle) -> &mut Self {
        if self.handle != Some(handle.id()) {
            *self = StagedContent {
                handle: Some(handle.id()),
                ..default()
            };
        }
        self
    }

    fn take_for(&mut self, handle: &SceneHandle) -> StagedContent {
        if self.handle == Some(handle.id()) {
            std::mem::take(self)
        } else {
            StagedContent::default()
        }
    }
}

/// The scene collaborator, built fresh for every system that needs it.
#[derive(SystemParam)]
pub struct BevyArScene<'w, 's> {
    commands: Commands<'w, 's>,
    spatial_query: SpatialQuery<'w, 's>,
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<PickerCamera>>,
    parents: Query<'w, 's, &'static ChildOf>,
    anchors: Query<'w, 's, &'static Name, With<PlacedAnchor>>,
    reticle: Res<'w, Reticle>,
    staged: Local<'s, StagedContent>,
}

impl BevyArScene<'_, '_> {
    /// The world-space ray through a viewport position of the device camera.
    pub fn viewport_ray(&self, position: Vec2) -> Option<Ray3d> {
        let (camera, camera_transform) = self.cameras.single().ok()?;
        camera.viewport_to_world(camera_transform, position).ok()
    }

    /// Walks up from `entity` to the picker anchor it belongs to.
    pub fn anchor_of(&self, entity: Entity) -> Option<Entity> {
        let mut current = entity;
        loop {
            if self.anchors.contains(current) {
                return Some(current);
            }
            current = self.parents.get(current).ok()?.parent();
        }
    }
}

impl ArScene for BevyArScene<'_, '_> {
    type Handle = SceneHandle;

    fn generate_collision(&mut self, handle: &SceneHandle, recursive: bool) {
        self.staged.stage(handle).collision_recursive = Some(recursive);
    }

    fn install_gestures(&mut self, handle: &SceneHandle, gestures: GestureSet) {
        self.staged.stage(handle).gestures = Some(gestures);
    }

    fn add_anchor(&mut self, name: &str, handle: &SceneHandle) -> AnchorId {
        // Anchor to whichever plane the reticle is on; the origin plane
        // before the session has found one.
        let position = self
            .reticle
            .0
            .position()
            .map(|p| Vec3::new(p.x, p.y, p.z))
            .unwrap_or(Vec3::ZERO);
        let staged = self.staged.take_for(handle);

        let mut anchor = self.commands.spawn((
            Name::new(name.to_string()),
            PlacedAnchor,
            Transform::from_translation(position),
            Visibility::default(),
        ));
        if let Some(gestures) = staged.gestures {
            anchor.insert(Manipulable(gestures));
        }
        let anchor = anchor.id();

        let mut content = self.commands.spawn((
            SceneRoot(handle.clone()),
            Transform::default(),
            ChildOf(anchor),
        ));
        match staged.collision_recursive {
            Some(true) => {
                content.insert(ColliderConstructorHierarchy::new(
                    ColliderConstructor::TrimeshFromMesh,
                ));
            }
            Some(false) => {
                debug!("[SCENE] Non-recursive collision requested; scene roots carry no mesh.");
            }
            None => {}
        }

        debug!("[SCENE] Spawned anchor {:?} at {}", anchor, position);
        AnchorId::from_entity(anchor)
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<SceneHit> {
        let ray = self.viewport_ray(Vec2::new(point.x, point.y))?;
        let hit = self.spatial_query.cast_ray(
            ray.origin,
            ray.direction,
            MAX_HIT_DISTANCE,
            true,
            &SpatialQueryFilter::default(),
        )?;

        let anchor = self.anchor_of(hit.entity);
        Some(SceneHit {
            anchor: anchor.map(AnchorId::from_entity),
            anchor_name: anchor
                .and_then(|entity| self.anchors.get(entity).ok())
                .map(|name| name.as_str().to_string()),
        })
    }

    fn remove_anchor(&mut self, anchor: AnchorId) -> bool {
        let entity = anchor.to_entity();
        if !self.anchors.contains(entity) {
            return false;
        }
        // Despawning is recursive, the placed content goes with it.
        self.commands.entity(entity).despawn();
        true
    }
}

pub struct SceneAttachmentPlugin;

impl Plugin for SceneAttachmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_confirmed_models, remove_long_pressed)
                .chain()
                .in_set(PickerSet::Attach),
        );
    }
}

/// Observation pass for the one-shot placement request.
fn attach_confirmed_models(
    mut controller: ResMut<Controller>,
    gateway: Res<Gateway>,
    mut scene: BevyArScene,
) {
    if controller.0.state().pending().is_empty() {
        return;
    }
    if let Some(outcome) = gateway.0.observe(&mut controller.0, &mut scene) {
        debug!("[SCENE] Placement request handled: {:?}", outcome);
    }
}

fn remove_long_pressed(
    mut long_presses: EventReader<LongPressed>,
    gateway: Res<Gateway>,
    mut scene: BevyArScene,
) {
    for LongPressed(position) in long_presses.read() {
        let outcome =
            gateway
                .0
                .handle_long_press(ScreenPoint::new(position.x, position.y), &mut scene);
        debug!("[SCENE] Long-press at {}: {:?}", position, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avian3d::spatial_query::SpatialQueryPipeline;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::state::app::StatesPlugin;

    use crate::picker::core::PickerCorePlugin;

    struct NoImages;

    impl ImageStore for NoImages {
        fn contains(&self, _name: &str) -> bool {
            false
        }
    }

    /// The picker core and the attachment plugin, already `Running`, with
    /// one loaded model ("teapot") in the catalog.
    fn running_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(PickerSettings::default())
            .init_resource::<Reticle>()
            .init_resource::<SpatialQueryPipeline>()
            .add_plugins((PickerCorePlugin, SceneAttachmentPlugin));

        let catalog = Catalog::from_identifiers(["teapot"], &NoImages, "teapot");
        catalog.records()[0].set_entity_handle(SceneHandle::default());
        app.insert_resource(ModelCatalog(catalog));

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        app
    }

    fn marked_anchors(app: &mut App) -> Vec<Entity> {
        let marker = PickerConfig::default().scene.anchor_marker;
        let mut anchors = app
            .world_mut()
            .query_filtered::<(Entity, &Name), With<PlacedAnchor>>();
        anchors
            .iter(app.world())
            .filter(|(_, name)| name.as_str() == marker)
            .map(|(entity, _)| entity)
            .collect()
    }

    #[test]
    fn staged_settings_apply_only_to_their_handle() {
        let teapot = SceneHandle::weak_from_u128(1);
        let robot = SceneHandle::weak_from_u128(2);
        let mut staged = StagedContent::default();

        staged.stage(&teapot).collision_recursive = Some(true);
        staged.stage(&teapot).gestures = Some(GestureSet::ALL);
        assert!(staged.take_for(&robot).gestures.is_none());

        let taken = staged.take_for(&teapot);
        assert_eq!(taken.collision_recursive, Some(true));
        assert_eq!(taken.gestures, Some(GestureSet::ALL));
        // Taking clears the stage.
        assert!(staged.take_for(&teapot).gestures.is_none());

        staged.stage(&teapot).gestures = Some(GestureSet::ALL);
        staged.stage(&robot).collision_recursive = Some(false);
        let taken = staged.take_for(&robot);
        assert!(taken.gestures.is_none());
        assert_eq!(taken.collision_recursive, Some(false));
    }

    #[test]
    fn confirmed_placement_spawns_one_anchor_across_frames() {
        let mut app = running_app();
        {
            let world = app.world_mut();
            let teapot = world.resource::<ModelCatalog>().0.records()[0].clone();
            let mut controller = world.resource_mut::<Controller>();
            assert!(controller.0.select_model(teapot));
            assert!(controller.0.confirm_place());
        }

        for _ in 0..4 {
            app.update();
        }

        let anchors = marked_anchors(&mut app);
        assert_eq!(anchors.len(), 1);
        let anchor = anchors[0];
        assert!(app.world().get::<Manipulable>(anchor).is_some());
        assert!(app.world().resource::<Controller>().0.state().pending().is_empty());

        let mut contents = app
            .world_mut()
            .query_filtered::<&ChildOf, (With<SceneRoot>, With<ColliderConstructorHierarchy>)>();
        let parents: Vec<Entity> = contents.iter(app.world()).map(ChildOf::parent).collect();
        assert_eq!(parents, vec![anchor]);
    }

    #[test]
    fn anchor_lookup_walks_up_and_removal_despawns_the_subtree() {
        let mut app = running_app();
        let world = app.world_mut();
        let anchor = world.spawn((Name::new("placed_model"), PlacedAnchor)).id();
        let content = world.spawn(ChildOf(anchor)).id();
        let mesh_part = world.spawn(ChildOf(content)).id();
        let stray = world.spawn(Name::new("Detected floor")).id();

        let found = world
            .run_system_once(move |scene: BevyArScene| {
                (scene.anchor_of(mesh_part), scene.anchor_of(stray))
            })
            .expect("lookup should run");
        assert_eq!(found, (Some(anchor), None));

        let removed = world
            .run_system_once(move |mut scene: BevyArScene| {
                (
                    scene.remove_anchor(AnchorId::from_entity(stray)),
                    scene.remove_anchor(AnchorId::from_entity(anchor)),
                )
            })
            .expect("removal should run");
        assert_eq!(removed, (false, true));

        assert!(world.get_entity(anchor).is_err());
        assert!(world.get_entity(mesh_part).is_err());
        assert!(world.get_entity(stray).is_ok());
    }
}
