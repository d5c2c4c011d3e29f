//! Priority-based behavior trait for mob AI.

use zbg_world::{Aabb, BlockPos, BlockView, Vec3};

/// What kind of output a behavior produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorType {
    /// Controls movement (only one active at a time).
    Movement,
    /// Non-movement (e.g., look at player). Multiple can co-exist.
    Passive,
}

/// A player as seen by mob AI during one think-step.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub runtime_id: u64,
    /// Feet position.
    pub position: Vec3,
    pub eye: Vec3,
    pub bounds: Aabb,
}

/// Read-only snapshot of the world state relevant to one mob.
pub struct BehaviorContext<'a> {
    pub mob_runtime_id: u64,
    /// Mob's feet position.
    pub mob_position: Vec3,
    /// Mob's eye position.
    pub mob_eye: Vec3,
    /// Mob's hitbox.
    pub mob_bounds: Aabb,
    /// Whether the mob is on the ground.
    pub mob_on_ground: bool,
    /// Current game tick.
    pub current_tick: u64,
    /// Every player in the world, in world order.
    pub players: &'a [PlayerSnapshot],
    /// Block access for sightline and target checks.
    pub blocks: &'a dyn BlockView,
}

impl BehaviorContext<'_> {
    /// Look up a player by runtime ID. `None` once the player has left.
    pub fn player(&self, runtime_id: u64) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.runtime_id == runtime_id)
    }

    /// Nearest player by straight-line distance from the mob's feet.
    pub fn nearest_player(&self) -> Option<(&PlayerSnapshot, f32)> {
        self.players
            .iter()
            .map(|p| (p, self.mob_position.distance(&p.position)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Request to walk toward a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub target: Vec3,
    /// Multiplier applied to the mob's base speed.
    pub speed: f32,
}

/// Request to turn the head toward a point, limited per think-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookRequest {
    pub point: Vec3,
    pub max_yaw_step: f32,
    pub max_pitch_step: f32,
}

/// Output actions from a behavior tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BehaviorOutput {
    /// Desired goal to walk toward.
    pub move_to: Option<MoveRequest>,
    /// Cancel any current navigation.
    pub stop_moving: bool,
    /// Desired look target.
    pub look_at: Option<LookRequest>,
    /// Glass blocks to start breaking this tick.
    pub break_blocks: Vec<BlockPos>,
}

/// A single behavior in the priority list.
pub trait Behavior: Send + Sync + std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// What kind of behavior this is.
    fn behavior_type(&self) -> BehaviorType;

    /// Priority (lower = higher priority).
    fn priority(&self) -> u32;

    /// Can this behavior start right now?
    fn can_start(&self, ctx: &BehaviorContext) -> bool;

    /// Should this behavior continue running?
    fn should_continue(&self, ctx: &BehaviorContext) -> bool {
        self.can_start(ctx)
    }

    /// Called once when the behavior activates.
    fn start(&mut self, _ctx: &BehaviorContext) -> BehaviorOutput {
        BehaviorOutput::default()
    }

    /// Called every tick while active.
    fn tick(&mut self, ctx: &BehaviorContext) -> BehaviorOutput;

    /// Called once when the behavior deactivates.
    fn stop(&mut self) {}
}
