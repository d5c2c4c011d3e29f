//! Glass break tracking: which blocks are being smashed, since when, and by whom.
//!
//! Breaking is timed, not damage based. A record is created on the first hit
//! and never changes afterwards; progress is `current_tick - start_tick`.
//! Records outlive the mob that started them, so a despawned zombie's glass
//! still shatters on schedule.

use std::collections::BTreeMap;

use tracing::{debug, trace};
use zbg_world::{BlockPos, BlockSound, LevelAccess, ParticleKind};

use crate::config::GlassBreakConfig;

/// One block being broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRecord {
    pub pos: BlockPos,
    pub start_tick: u64,
    /// Runtime ID of the mob that landed the first hit. Bookkeeping only;
    /// the mob may no longer exist.
    pub instigator: u64,
}

/// What happened to a record when its timer ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    /// The glass was still there and has been destroyed.
    Broken(BlockPos),
    /// The block had already stopped being glass; the record was dropped.
    Expired(BlockPos),
}

/// Per-world registry of in-progress glass breaks.
#[derive(Debug)]
pub struct GlassBreakTracker {
    records: BTreeMap<BlockPos, BreakRecord>,
    break_ticks: u64,
    particle_interval: u64,
}

impl Default for GlassBreakTracker {
    fn default() -> Self {
        Self::from_config(&GlassBreakConfig::default())
    }
}

impl GlassBreakTracker {
    pub fn new(break_ticks: u64, particle_interval: u64) -> Self {
        Self {
            records: BTreeMap::new(),
            break_ticks,
            particle_interval: particle_interval.max(1),
        }
    }

    pub fn from_config(config: &GlassBreakConfig) -> Self {
        Self::new(config.break_ticks, config.particle_interval)
    }

    /// Start breaking the glass at `pos`.
    ///
    /// Does nothing if `pos` is already tracked or is not glass. Otherwise
    /// records the current tick, plays the hit sound once, and returns `true`.
    pub fn start_breaking<L: LevelAccess + ?Sized>(
        &mut self,
        level: &mut L,
        pos: BlockPos,
        instigator: u64,
    ) -> bool {
        if self.records.contains_key(&pos) {
            return false;
        }
        if !level.registry().is_breakable_for_sight(level.block_at(pos)) {
            return false;
        }

        let start_tick = level.current_tick();
        self.records.insert(
            pos,
            BreakRecord {
                pos,
                start_tick,
                instigator,
            },
        );
        level.play_sound(pos, BlockSound::GlassHit);
        debug!(
            "Mob {} started breaking glass at {} (tick {})",
            instigator, pos, start_tick
        );
        true
    }

    /// Advance every record by the level's current tick.
    ///
    /// Emits crack particles every `particle_interval` ticks while the block is
    /// still glass. Once `break_ticks` have elapsed the glass is destroyed (if
    /// it is still glass) and the record is removed either way.
    pub fn tick<L: LevelAccess + ?Sized>(&mut self, level: &mut L) -> Vec<BreakOutcome> {
        let now = level.current_tick();
        let break_ticks = self.break_ticks;
        let particle_interval = self.particle_interval;
        let mut outcomes = Vec::new();

        self.records.retain(|&pos, record| {
            let elapsed = now.saturating_sub(record.start_tick);
            let state = level.block_at(pos);
            let still_glass = level.registry().is_breakable_for_sight(state);

            if still_glass && elapsed > 0 && elapsed % particle_interval == 0 {
                trace!("Crack particles at {} ({} ticks)", pos, elapsed);
                level.spawn_particle(pos.center(), ParticleKind::BlockCrack, state);
            }

            if elapsed < break_ticks {
                return true;
            }

            if still_glass {
                level.play_sound(pos, BlockSound::GlassBreak);
                level.destroy_block(pos, true);
                debug!("Glass at {} broken (started by mob {})", pos, record.instigator);
                outcomes.push(BreakOutcome::Broken(pos));
            } else {
                debug!("Dropping stale glass break record at {}", pos);
                outcomes.push(BreakOutcome::Expired(pos));
            }
            false
        });

        outcomes
    }

    pub fn record(&self, pos: BlockPos) -> Option<&BreakRecord> {
        self.records.get(&pos)
    }

    pub fn is_breaking(&self, pos: BlockPos) -> bool {
        self.records.contains_key(&pos)
    }

    /// All records in position order.
    pub fn records(&self) -> impl Iterator<Item = &BreakRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
