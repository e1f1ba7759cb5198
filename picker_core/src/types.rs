// picker_core/src/types.rs

use nalgebra::{Point2, Point3};

// --- Core Type Aliases ---
/// A 2D touch or cursor location in logical screen pixels.
pub type ScreenPoint = Point2<f32>;
/// A 3D point on a detected surface, in scene coordinates.
pub type SurfacePoint = Point3<f32>;

// --- Core Identifier ---
/// Identifies an anchor that lives in the collaborator's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnchorId(pub u64);

impl AnchorId {
    // A convenience method for use in the Bevy adapter crate.
    #[cfg(feature = "bevy")] // This will only compile if the "bevy" feature is enabled
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }

    #[cfg(feature = "bevy")]
    pub fn to_entity(self) -> bevy_ecs::prelude::Entity {
        bevy_ecs::prelude::Entity::from_bits(self.0)
    }
}
