//! ECS components for players and mobs.

use bevy_ecs::prelude::*;
use zbg_world::{Aabb, Vec3};

/// Simulation identity for an entity. Other systems refer to entities by
/// `runtime_id`, never by ECS handle, so a stale ID simply stops resolving.
#[derive(Component, Debug, Clone, Copy)]
pub struct EntityId {
    pub runtime_id: u64,
}

/// Feet position in the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct Position(pub Vec3);

/// Rotation angles in degrees.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
}

/// Velocity in blocks per tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec3);

/// Whether the entity is standing on the ground.
#[derive(Component, Debug, Clone, Copy)]
pub struct OnGround(pub bool);

/// Axis-aligned bounding box dimensions.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// World-space hitbox for an entity standing at `feet`.
    pub fn aabb_at(&self, feet: Vec3) -> Aabb {
        Aabb::from_feet(feet, self.width, self.height)
    }
}

/// Eye height above the feet (blocks).
#[derive(Component, Debug, Clone, Copy)]
pub struct EyeHeight(pub f32);

impl EyeHeight {
    pub fn eye(&self, feet: Vec3) -> Vec3 {
        Vec3::new(feet.x, feet.y + self.0, feet.z)
    }
}

/// The identifier type string, e.g. `"minecraft:zombie"`.
#[derive(Component, Debug, Clone)]
pub struct MobType(pub String);

/// Base movement speed in blocks/tick (copied from MobDefinition at spawn time).
#[derive(Component, Debug, Clone, Copy)]
pub struct MovementSpeed(pub f32);

/// Current walk goal set by the AI.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Navigation {
    pub goal: Option<Vec3>,
    /// Multiplier applied to [`MovementSpeed`].
    pub speed: f32,
}

/// Marker: this entity is a mob (non-player).
#[derive(Component, Debug)]
pub struct Mob;

/// Marker: this entity is a player.
#[derive(Component, Debug)]
pub struct Player;
