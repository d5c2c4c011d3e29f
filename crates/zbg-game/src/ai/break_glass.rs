//! BreakGlass (Movement, priority 2 by default): walk up to glass standing
//! between the mob and a player it can see, then smash it.
//!
//! The state is implicit in the two targets:
//!
//! | target_player | target_glass | state                          |
//! |---------------|--------------|--------------------------------|
//! | `None`        | `None`       | idle                           |
//! | `Some`        | `Some`       | approaching, or breaking once in reach |
//!
//! Activation looks at the first player whose hitbox intersects the mob's
//! hitbox grown by `detection_range`. That player must be visible with glass
//! ignored, and some glass must sit on the eye-to-eye ray within
//! `glass_break_range`.

use tracing::debug;
use zbg_world::{BlockPos, Vec3};

use super::behavior::{
    Behavior, BehaviorContext, BehaviorOutput, BehaviorType, LookRequest, MoveRequest,
};
use crate::config::GlassBreakConfig;
use crate::sightline::{find_glass_on_ray, has_sight_through_glass};

#[derive(Debug)]
pub struct BreakGlass {
    detection_range: f32,
    detection_range_sq: f32,
    glass_break_range: f32,
    reach_distance_sq: f32,
    move_speed: f32,
    look_yaw_step: f32,
    look_pitch_step: f32,
    priority: u32,
    break_above: bool,

    target_player: Option<u64>,
    target_glass: Option<BlockPos>,
    /// Think-steps since activation.
    ticks_in_state: u32,
}

impl BreakGlass {
    pub fn new(config: &GlassBreakConfig) -> Self {
        Self {
            detection_range: config.detection_range,
            detection_range_sq: config.detection_range_sq(),
            glass_break_range: config.glass_break_range,
            reach_distance_sq: config.reach_distance_sq,
            move_speed: config.move_speed,
            look_yaw_step: config.look_yaw_step,
            look_pitch_step: config.look_pitch_step,
            priority: config.priority,
            break_above: config.break_above,
            target_player: None,
            target_glass: None,
            ticks_in_state: 0,
        }
    }

    pub fn target_player(&self) -> Option<u64> {
        self.target_player
    }

    pub fn target_glass(&self) -> Option<BlockPos> {
        self.target_glass
    }

    pub fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }

    /// Player and glass this mob would go after right now, if any.
    fn acquire(&self, ctx: &BehaviorContext) -> Option<(u64, BlockPos)> {
        let search = ctx.mob_bounds.inflate(self.detection_range);
        let player = ctx.players.iter().find(|p| p.bounds.intersects(&search))?;

        if !has_sight_through_glass(ctx.blocks, ctx.mob_eye, player.eye) {
            return None;
        }
        let glass = find_glass_on_ray(ctx.blocks, ctx.mob_eye, player.eye, self.glass_break_range)?;
        Some((player.runtime_id, glass))
    }

    fn is_glass(ctx: &BehaviorContext, pos: BlockPos) -> bool {
        ctx.blocks
            .registry()
            .is_breakable_for_sight(ctx.blocks.block_at(pos))
    }
}

impl Behavior for BreakGlass {
    fn name(&self) -> &'static str {
        "break_glass"
    }

    fn behavior_type(&self) -> BehaviorType {
        BehaviorType::Movement
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_start(&self, ctx: &BehaviorContext) -> bool {
        self.acquire(ctx).is_some()
    }

    fn should_continue(&self, ctx: &BehaviorContext) -> bool {
        let (Some(player_id), Some(glass)) = (self.target_player, self.target_glass) else {
            return false;
        };
        let Some(player) = ctx.player(player_id) else {
            return false;
        };
        if ctx.mob_position.distance_sq(&player.position) > self.detection_range_sq {
            return false;
        }
        if !Self::is_glass(ctx, glass) {
            return false;
        }
        has_sight_through_glass(ctx.blocks, ctx.mob_eye, player.eye)
    }

    fn start(&mut self, ctx: &BehaviorContext) -> BehaviorOutput {
        if let Some((player, glass)) = self.acquire(ctx) {
            debug!(
                "Mob {} targets glass at {} between it and player {}",
                ctx.mob_runtime_id, glass, player
            );
            self.target_player = Some(player);
            self.target_glass = Some(glass);
        }
        self.ticks_in_state = 0;
        BehaviorOutput::default()
    }

    fn tick(&mut self, ctx: &BehaviorContext) -> BehaviorOutput {
        let Some(glass) = self.target_glass else {
            return BehaviorOutput::default();
        };
        self.ticks_in_state = self.ticks_in_state.saturating_add(1);

        if reach_distance_sq(ctx.mob_position, glass) > self.reach_distance_sq {
            return BehaviorOutput {
                move_to: Some(MoveRequest {
                    target: glass.bottom_center(),
                    speed: self.move_speed,
                }),
                ..Default::default()
            };
        }

        let mut break_blocks = vec![glass];
        let above = glass.up();
        if self.break_above && Self::is_glass(ctx, above) {
            break_blocks.push(above);
        }
        BehaviorOutput {
            stop_moving: true,
            look_at: Some(LookRequest {
                point: glass.center(),
                max_yaw_step: self.look_yaw_step,
                max_pitch_step: self.look_pitch_step,
            }),
            break_blocks,
            ..Default::default()
        }
    }

    fn stop(&mut self) {
        if let Some(glass) = self.target_glass {
            debug!("Giving up on glass at {}", glass);
        }
        self.target_player = None;
        self.target_glass = None;
        self.ticks_in_state = 0;
    }
}

/// Squared distance from `feet` to the minimum corner of `glass`.
pub fn reach_distance_sq(feet: Vec3, glass: BlockPos) -> f32 {
    feet.distance_sq(&glass.corner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::behavior::PlayerSnapshot;
    use zbg_world::{Aabb, Level};

    const FEET_Y: f32 = 4.0;

    fn player_at(runtime_id: u64, x: f32) -> PlayerSnapshot {
        let feet = Vec3::new(x, FEET_Y, 0.5);
        PlayerSnapshot {
            runtime_id,
            position: feet,
            eye: Vec3::new(x, FEET_Y + 1.62, 0.5),
            bounds: Aabb::from_feet(feet, 0.6, 1.8),
        }
    }

    fn ctx_at<'a>(level: &'a Level, players: &'a [PlayerSnapshot], x: f32) -> BehaviorContext<'a> {
        let feet = Vec3::new(x, FEET_Y, 0.5);
        BehaviorContext {
            mob_runtime_id: 100,
            mob_position: feet,
            mob_eye: Vec3::new(x, FEET_Y + 1.74, 0.5),
            mob_bounds: Aabb::from_feet(feet, 0.6, 1.95),
            mob_on_ground: true,
            current_tick: 1,
            players,
            blocks: level,
        }
    }

    /// Flat floor, a two-high glass pane wall at x = 3, mob at x = 0.5,
    /// player at x = 10.5 (ten blocks away).
    fn glass_wall() -> Level {
        let mut level = Level::flat(1);
        level
            .set_block_named(BlockPos::new(3, 5, 0), "minecraft:glass_pane")
            .unwrap();
        level
            .set_block_named(BlockPos::new(3, 4, 0), "minecraft:glass_pane")
            .unwrap();
        level
    }

    #[test]
    fn activates_on_glass_between_mob_and_player() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let ctx = ctx_at(&level, &players, 0.5);

        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(bg.can_start(&ctx));
        bg.start(&ctx);
        assert_eq!(bg.target_player(), Some(7));
        assert_eq!(bg.target_glass(), Some(BlockPos::new(3, 5, 0)));
        assert_eq!(bg.ticks_in_state(), 0);
    }

    #[test]
    fn no_players_no_activation() {
        let level = glass_wall();
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &[], 0.5)));
    }

    #[test]
    fn no_glass_on_ray_no_activation() {
        let level = Level::flat(1);
        let players = [player_at(7, 10.5)];
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn glass_beyond_break_range_is_ignored() {
        let mut level = Level::flat(1);
        level
            .set_block_named(BlockPos::new(8, 5, 0), "minecraft:glass")
            .unwrap();
        let players = [player_at(7, 10.5)];
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn opaque_wall_blocks_activation() {
        let mut level = glass_wall();
        level
            .set_block_named(BlockPos::new(6, 5, 0), "minecraft:stone")
            .unwrap();
        let players = [player_at(7, 10.5)];
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn player_outside_detection_box_is_ignored() {
        let level = glass_wall();
        let players = [player_at(7, 20.0)];
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn first_found_player_wins() {
        let level = glass_wall();
        // The first player has a clear line with no glass; the second is behind glass.
        let players = [player_at(1, -5.0), player_at(2, 10.5)];
        let bg = BreakGlass::new(&GlassBreakConfig::default());
        assert!(!bg.can_start(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn out_of_reach_walks_to_glass() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let ctx = ctx_at(&level, &players, 0.5);
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx);

        let out = bg.tick(&ctx);
        let mv = out.move_to.unwrap();
        assert_eq!(mv.target, Vec3::new(3.5, 5.0, 0.5));
        assert!((mv.speed - 1.0).abs() < f32::EPSILON);
        assert!(out.break_blocks.is_empty());
        assert!(!out.stop_moving);
    }

    #[test]
    fn in_reach_breaks_glass_and_the_block_above() {
        let mut level = glass_wall();
        level
            .set_block_named(BlockPos::new(3, 6, 0), "minecraft:glass_pane")
            .unwrap();
        let players = [player_at(7, 10.5)];
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx_at(&level, &players, 0.5));

        // Feet at (2.5, 4, 0.5): 0.25 + 1 + 0.25 = 1.5 from the corner of (3, 5, 0)
        let near = ctx_at(&level, &players, 2.5);
        assert!(reach_distance_sq(near.mob_position, BlockPos::new(3, 5, 0)) <= 4.0);
        let out = bg.tick(&near);
        assert!(out.stop_moving);
        assert!(out.move_to.is_none());
        assert_eq!(out.look_at.unwrap().point, Vec3::new(3.5, 5.5, 0.5));
        assert_eq!(
            out.break_blocks,
            vec![BlockPos::new(3, 5, 0), BlockPos::new(3, 6, 0)]
        );
    }

    #[test]
    fn block_above_only_when_glass() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx_at(&level, &players, 0.5));
        let out = bg.tick(&ctx_at(&level, &players, 2.5));
        assert_eq!(out.break_blocks, vec![BlockPos::new(3, 5, 0)]);
    }

    #[test]
    fn break_above_can_be_disabled() {
        let mut level = glass_wall();
        level
            .set_block_named(BlockPos::new(3, 6, 0), "minecraft:glass")
            .unwrap();
        let players = [player_at(7, 10.5)];
        let config = GlassBreakConfig {
            break_above: false,
            ..Default::default()
        };
        let mut bg = BreakGlass::new(&config);
        bg.start(&ctx_at(&level, &players, 0.5));
        let out = bg.tick(&ctx_at(&level, &players, 2.5));
        assert_eq!(out.break_blocks, vec![BlockPos::new(3, 5, 0)]);
    }

    #[test]
    fn continues_while_target_valid() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let ctx = ctx_at(&level, &players, 0.5);
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx);
        assert!(bg.should_continue(&ctx));
    }

    #[test]
    fn stops_when_player_beyond_detection_range() {
        let level = glass_wall();
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        let players = [player_at(7, 10.5)];
        bg.start(&ctx_at(&level, &players, 0.5));

        // 17 blocks away: 289 > 256
        let far = [player_at(7, 17.5)];
        assert!(!bg.should_continue(&ctx_at(&level, &far, 0.5)));
    }

    #[test]
    fn detection_range_boundary() {
        let level = glass_wall();
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        let players = [player_at(7, 10.5)];
        bg.start(&ctx_at(&level, &players, 0.5));

        // Exactly 16 blocks: 256 is still in range
        let edge = [player_at(7, 16.5)];
        assert!(bg.should_continue(&ctx_at(&level, &edge, 0.5)));

        let past = [player_at(7, 16.51)];
        assert!(!bg.should_continue(&ctx_at(&level, &past, 0.5)));
    }

    #[test]
    fn reach_is_measured_to_the_block_corner() {
        let glass = BlockPos::new(3, 4, 0);
        // Close to the centre but far from the corner
        let beside = Vec3::new(4.3, 4.0, 2.0);
        assert!((reach_distance_sq(beside, glass) - 5.69).abs() < 1e-3);
        // Close to the corner but far from the centre
        let behind = Vec3::new(2.0, 4.0, -1.0);
        assert!((reach_distance_sq(behind, glass) - 2.0).abs() < 1e-3);
    }

    #[test]
    fn diagonal_approach_uses_corner_distance() {
        let mut level = Level::flat(1);
        level
            .set_block_named(BlockPos::new(3, 4, 0), "minecraft:glass")
            .unwrap();
        let glass = BlockPos::new(3, 4, 0);
        let feet = Vec3::new(4.3, FEET_Y, 2.0);
        let ctx = BehaviorContext {
            mob_runtime_id: 100,
            mob_position: feet,
            mob_eye: Vec3::new(feet.x, FEET_Y + 1.74, feet.z),
            mob_bounds: Aabb::from_feet(feet, 0.6, 1.95),
            mob_on_ground: true,
            current_tick: 1,
            players: &[],
            blocks: &level,
        };
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.target_player = Some(7);
        bg.target_glass = Some(glass);

        // 1.69 + 0 + 4.0 from the corner: still walking
        let out = bg.tick(&ctx);
        assert!(out.break_blocks.is_empty());
        assert_eq!(out.move_to.unwrap().target, glass.bottom_center());
    }

    #[test]
    fn stops_when_player_leaves() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx_at(&level, &players, 0.5));
        assert!(!bg.should_continue(&ctx_at(&level, &[], 0.5)));
    }

    #[test]
    fn stops_when_glass_gone() {
        let mut level = glass_wall();
        let players = [player_at(7, 10.5)];
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx_at(&level, &players, 0.5));

        level.set_block_named(BlockPos::new(3, 5, 0), "minecraft:air").unwrap();
        assert!(!bg.should_continue(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn stops_when_sight_lost() {
        let mut level = glass_wall();
        let players = [player_at(7, 10.5)];
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx_at(&level, &players, 0.5));

        level.set_block_named(BlockPos::new(6, 5, 0), "minecraft:stone").unwrap();
        assert!(!bg.should_continue(&ctx_at(&level, &players, 0.5)));
    }

    #[test]
    fn stop_clears_state() {
        let level = glass_wall();
        let players = [player_at(7, 10.5)];
        let ctx = ctx_at(&level, &players, 0.5);
        let mut bg = BreakGlass::new(&GlassBreakConfig::default());
        bg.start(&ctx);
        bg.tick(&ctx);
        assert_eq!(bg.ticks_in_state(), 1);

        bg.stop();
        assert_eq!(bg.target_player(), None);
        assert_eq!(bg.target_glass(), None);
        assert_eq!(bg.ticks_in_state(), 0);
        assert!(!bg.should_continue(&ctx));
    }
}
