//! Baseline behaviors every mob gets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zbg_world::Vec3;

use super::behavior::{
    Behavior, BehaviorContext, BehaviorOutput, BehaviorType, LookRequest, MoveRequest,
};
use super::navigation;

// ---------------------------------------------------------------------------
// RandomStroll (Movement, priority 7), wander aimlessly
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RandomStroll {
    /// Current stroll destination, if any.
    goal: Option<Vec3>,
    /// Tick when the mob can pick a new destination.
    cooldown_until: u64,
    rng: StdRng,
}

impl RandomStroll {
    pub fn new(seed: u64) -> Self {
        Self {
            goal: None,
            cooldown_until: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn walk_to(goal: Vec3) -> BehaviorOutput {
        BehaviorOutput {
            move_to: Some(MoveRequest {
                target: goal,
                speed: 1.0,
            }),
            look_at: Some(LookRequest {
                point: Vec3::new(goal.x, goal.y + 1.0, goal.z),
                max_yaw_step: 10.0,
                max_pitch_step: 40.0,
            }),
            ..Default::default()
        }
    }
}

impl Behavior for RandomStroll {
    fn name(&self) -> &'static str {
        "random_stroll"
    }

    fn behavior_type(&self) -> BehaviorType {
        BehaviorType::Movement
    }

    fn priority(&self) -> u32 {
        7
    }

    fn can_start(&self, ctx: &BehaviorContext) -> bool {
        ctx.mob_on_ground && ctx.current_tick >= self.cooldown_until && self.goal.is_none()
    }

    fn should_continue(&self, _ctx: &BehaviorContext) -> bool {
        self.goal.is_some()
    }

    fn start(&mut self, ctx: &BehaviorContext) -> BehaviorOutput {
        let dx: f32 = self.rng.gen_range(-10.0..10.0);
        let dz: f32 = self.rng.gen_range(-10.0..10.0);
        self.goal = Some(Vec3::new(
            ctx.mob_position.x + dx,
            ctx.mob_position.y,
            ctx.mob_position.z + dz,
        ));
        BehaviorOutput::default()
    }

    fn tick(&mut self, ctx: &BehaviorContext) -> BehaviorOutput {
        let Some(goal) = self.goal else {
            return BehaviorOutput::default();
        };

        let dist = navigation::distance_xz(ctx.mob_position.x, ctx.mob_position.z, goal.x, goal.z);
        if dist < 0.5 {
            // Arrived, set cooldown and clear goal
            self.goal = None;
            self.cooldown_until = ctx.current_tick + self.rng.gen_range(40..120);
            return BehaviorOutput {
                stop_moving: true,
                ..Default::default()
            };
        }

        Self::walk_to(goal)
    }

    fn stop(&mut self) {
        self.goal = None;
    }
}

// ---------------------------------------------------------------------------
// LookAtPlayer (Passive, priority 8), face nearest player
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LookAtPlayer {
    /// Maximum detection range (blocks).
    range: f32,
}

impl LookAtPlayer {
    pub fn new(range: f32) -> Self {
        Self { range }
    }
}

impl Behavior for LookAtPlayer {
    fn name(&self) -> &'static str {
        "look_at_player"
    }

    fn behavior_type(&self) -> BehaviorType {
        BehaviorType::Passive
    }

    fn priority(&self) -> u32 {
        8
    }

    fn can_start(&self, ctx: &BehaviorContext) -> bool {
        match ctx.nearest_player() {
            Some((_, dist)) => dist <= self.range,
            None => false,
        }
    }

    fn tick(&mut self, ctx: &BehaviorContext) -> BehaviorOutput {
        match ctx.nearest_player() {
            Some((player, _)) => BehaviorOutput {
                look_at: Some(LookRequest {
                    point: player.eye,
                    max_yaw_step: 10.0,
                    max_pitch_step: 40.0,
                }),
                ..Default::default()
            },
            None => BehaviorOutput::default(),
        }
    }
}
