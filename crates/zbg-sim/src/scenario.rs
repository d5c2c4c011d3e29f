//! The glass house scenario: a player in a glass-walled hut, zombies outside.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};
use zbg_game::{BreakOutcome, GameError, GameEvent, GameWorld};
use zbg_world::flat_generator::FLAT_SURFACE_Y;
use zbg_world::{BlockPos, BlockView, Level, LevelEvent, Vec3};

use crate::config::SimConfig;

/// Counters gathered while the scenario runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub hits: u64,
    pub particles: u64,
    pub broken: u64,
    pub expired: u64,
    pub blocks_destroyed: u64,
    pub mob_moves: u64,
}

pub struct Scenario {
    pub game: GameWorld,
    pub player: u64,
    pub zombies: Vec<u64>,
    /// Every glass block the house was built with.
    pub windows: Vec<BlockPos>,
    pub stats: SimStats,
}

impl Scenario {
    /// Build the world described by `config`: flat ground, a square house of
    /// glass on a one-block sill around the player, and zombies on a circle.
    pub fn build(config: &SimConfig) -> Result<Self, GameError> {
        let level = Level::flat(config.world.chunk_radius);
        let mut game = GameWorld::new(level, config.glass_break.clone(), config.simulation.seed)?;

        let scenario = &config.scenario;
        let center = BlockPos::from_vec3(&scenario.player_position);
        let half = scenario.house_size / 2;
        let mut windows = Vec::new();

        for dx in -half..=half {
            for dz in -half..=half {
                if dx.abs() != half && dz.abs() != half {
                    continue;
                }
                let x = center.x + dx;
                let z = center.z + dz;
                game.place_block(BlockPos::new(x, FLAT_SURFACE_Y, z), &scenario.sill_block)?;
                for y in FLAT_SURFACE_Y + 1..=FLAT_SURFACE_Y + 2 {
                    let pos = BlockPos::new(x, y, z);
                    game.place_block(pos, &config.world.glass_block)?;
                    windows.push(pos);
                }
            }
        }
        info!(
            "Built a {}x{} glass house ({} panes) around {}",
            scenario.house_size,
            scenario.house_size,
            windows.len(),
            center
        );

        let player = game.spawn_player(scenario.player_position);

        let mut rng = StdRng::seed_from_u64(config.simulation.seed);
        let mut zombies = Vec::with_capacity(scenario.zombie_count as usize);
        for _ in 0..scenario.zombie_count {
            let angle = rng.gen_range(0.0..TAU);
            let at = Vec3::new(
                scenario.player_position.x + angle.cos() * scenario.spawn_radius,
                FLAT_SURFACE_Y as f32,
                scenario.player_position.z + angle.sin() * scenario.spawn_radius,
            );
            zombies.push(game.spawn_mob(&scenario.zombie_type, at)?);
        }

        Ok(Self {
            game,
            player,
            zombies,
            windows,
            stats: SimStats::default(),
        })
    }

    /// Advance one tick and fold its events into the stats.
    pub fn step(&mut self) {
        let outcomes = self.game.tick();
        self.stats.ticks += 1;
        let tick = self.game.current_tick();

        for outcome in outcomes {
            match outcome {
                BreakOutcome::Broken(pos) => {
                    self.stats.broken += 1;
                    info!("Tick {}: glass at {} shattered", tick, pos);
                }
                BreakOutcome::Expired(pos) => {
                    self.stats.expired += 1;
                    debug!("Tick {}: break at {} expired, block already gone", tick, pos);
                }
            }
        }

        for event in self.game.drain_events() {
            match event {
                GameEvent::MobSpawned {
                    runtime_id,
                    mob_type,
                    position,
                } => info!("{} {} spawned at {}", mob_type, runtime_id, position),
                GameEvent::MobMoved {
                    runtime_id,
                    position,
                    ..
                } => {
                    self.stats.mob_moves += 1;
                    trace!("Mob {} at {}", runtime_id, position);
                }
                GameEvent::EntityRemoved { runtime_id } => {
                    debug!("Entity {} removed", runtime_id)
                }
                GameEvent::Level(LevelEvent::Sound { pos, sound }) => {
                    if sound == zbg_world::BlockSound::GlassHit {
                        self.stats.hits += 1;
                    }
                    debug!(
                        "Sound {} [{}] at {} (volume {}, pitch {})",
                        sound.identifier(),
                        sound.category(),
                        pos,
                        sound.volume(),
                        sound.pitch()
                    );
                }
                GameEvent::Level(LevelEvent::Particle {
                    at, block_state, ..
                }) => {
                    self.stats.particles += 1;
                    trace!("Crack particles at {} (state {:#010x})", at, block_state);
                }
                GameEvent::Level(LevelEvent::BlockDestroyed {
                    pos, drop_items, ..
                }) => {
                    self.stats.blocks_destroyed += 1;
                    debug!("Block at {} destroyed (drops: {})", pos, drop_items);
                }
            }
        }
    }

    /// Windows that are still glass.
    pub fn windows_intact(&self) -> usize {
        let level = &self.game.level;
        self.windows
            .iter()
            .filter(|&&pos| level.registry().is_breakable_for_sight(level.block_at(pos)))
            .count()
    }

    pub fn log_summary(&self) {
        info!(
            "After {} ticks: {} hits, {} panes broken, {} expired, {} particles, {}/{} windows intact",
            self.stats.ticks,
            self.stats.hits,
            self.stats.broken,
            self.stats.expired,
            self.stats.particles,
            self.windows_intact(),
            self.windows.len()
        );
    }
}
