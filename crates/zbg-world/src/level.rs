//! Level collaborator traits and the in-memory level.
//!
//! Mob AI and the glass tracker only talk to the world through [`BlockView`]
//! and [`LevelAccess`]. [`Level`] is the chunk-backed implementation used by
//! the game world and the tests.

use std::collections::HashMap;

use tracing::trace;

use crate::block_hash::FlatWorldBlocks;
use crate::block_registry::BlockRegistry;
use crate::chunk::{ChunkColumn, OVERWORLD_MAX_Y, OVERWORLD_MIN_Y};
use crate::error::WorldError;
use crate::flat_generator::generate_flat_chunk;
use crate::pos::{BlockPos, Vec3};

/// Read-only block access.
pub trait BlockView {
    /// Runtime ID of the block at `pos`. Unloaded space reads as air.
    fn block_at(&self, pos: BlockPos) -> u32;

    /// Registry used to interpret runtime IDs.
    fn registry(&self) -> &BlockRegistry;
}

/// Mutable level access: time, block removal, and audiovisual effects.
pub trait LevelAccess: BlockView {
    /// Current game tick.
    fn current_tick(&self) -> u64;

    /// Replace the block at `pos` with air, optionally dropping its item.
    /// Returns `false` if there was nothing to destroy.
    fn destroy_block(&mut self, pos: BlockPos, drop_items: bool) -> bool;

    /// Play a block sound at `pos`.
    fn play_sound(&mut self, pos: BlockPos, sound: BlockSound);

    /// Spawn a decorative particle at `at`, keyed to a block state.
    fn spawn_particle(&mut self, at: Vec3, kind: ParticleKind, block_state: u32);
}

/// Block sounds emitted by the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSound {
    GlassHit,
    GlassBreak,
}

impl BlockSound {
    /// Sound event identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            BlockSound::GlassHit => "block.glass.hit",
            BlockSound::GlassBreak => "block.glass.break",
        }
    }

    /// Mixer category.
    pub fn category(&self) -> &'static str {
        "blocks"
    }

    pub fn volume(&self) -> f32 {
        1.0
    }

    pub fn pitch(&self) -> f32 {
        1.0
    }
}

/// Particle effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Cracking fragments textured after a block state.
    BlockCrack,
}

/// Effects produced by the level, drained by whoever presents them.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    Sound {
        pos: BlockPos,
        sound: BlockSound,
    },
    Particle {
        at: Vec3,
        kind: ParticleKind,
        block_state: u32,
    },
    BlockDestroyed {
        pos: BlockPos,
        previous: u32,
        drop_items: bool,
    },
}

/// Chunk-backed level with a tick counter and an effect queue.
pub struct Level {
    chunks: HashMap<(i32, i32), ChunkColumn>,
    registry: BlockRegistry,
    tick: u64,
    events: Vec<LevelEvent>,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// An empty level: every position reads as air.
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
            registry: BlockRegistry::new(),
            tick: 0,
            events: Vec::new(),
        }
    }

    /// A flat level with chunks generated in `[-radius, radius]` on both axes.
    pub fn flat(radius: i32) -> Self {
        let mut level = Self::new();
        let blocks = FlatWorldBlocks::compute();
        for cx in -radius..=radius {
            for cz in -radius..=radius {
                level
                    .chunks
                    .insert((cx, cz), generate_flat_chunk(cx, cz, &blocks));
            }
        }
        level
    }

    /// Number of loaded chunk columns.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Advance the tick counter by one and return the new tick.
    pub fn advance_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Set a block by runtime ID. Chunks are created (as air) on demand.
    pub fn set_block(&mut self, pos: BlockPos, runtime_id: u32) -> Result<(), WorldError> {
        if !(OVERWORLD_MIN_Y..OVERWORLD_MAX_Y).contains(&pos.y) {
            return Err(WorldError::OutOfBuildRange {
                y: pos.y,
                min: OVERWORLD_MIN_Y,
                max: OVERWORLD_MAX_Y,
            });
        }
        let (cx, cz) = pos.chunk_coords();
        let air = self.registry.air();
        let column = self
            .chunks
            .entry((cx, cz))
            .or_insert_with(|| ChunkColumn::new_filled(cx, cz, air));
        column.set_block_world(local(pos.x), pos.y, local(pos.z), runtime_id);
        Ok(())
    }

    /// Set a block by identifier, e.g. `"minecraft:glass"`.
    pub fn set_block_named(&mut self, pos: BlockPos, name: &str) -> Result<(), WorldError> {
        let runtime_id = self.registry.runtime_id(name)?;
        self.set_block(pos, runtime_id)
    }

    /// Identifier of the block at `pos`, if known.
    pub fn block_name(&self, pos: BlockPos) -> Option<&'static str> {
        self.registry.name(self.block_at(pos))
    }

    /// Take all queued effects.
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }
}

impl BlockView for Level {
    fn block_at(&self, pos: BlockPos) -> u32 {
        self.chunks
            .get(&pos.chunk_coords())
            .and_then(|col| col.get_block_world(local(pos.x), pos.y, local(pos.z)))
            .unwrap_or(self.registry.air())
    }

    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }
}

impl LevelAccess for Level {
    fn current_tick(&self) -> u64 {
        self.tick
    }

    fn destroy_block(&mut self, pos: BlockPos, drop_items: bool) -> bool {
        let previous = self.block_at(pos);
        if self.registry.is_air(previous) {
            return false;
        }
        let air = self.registry.air();
        if self.set_block(pos, air).is_err() {
            return false;
        }
        self.events.push(LevelEvent::BlockDestroyed {
            pos,
            previous,
            drop_items,
        });
        true
    }

    fn play_sound(&mut self, pos: BlockPos, sound: BlockSound) {
        trace!("sound {} at {}", sound.identifier(), pos);
        self.events.push(LevelEvent::Sound { pos, sound });
    }

    fn spawn_particle(&mut self, at: Vec3, kind: ParticleKind, block_state: u32) {
        self.events.push(LevelEvent::Particle {
            at,
            kind,
            block_state,
        });
    }
}

/// World coordinate to chunk-local coordinate.
fn local(v: i32) -> usize {
    (v & 15) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_level_is_air() {
        let level = Level::new();
        let air = level.registry().air();
        assert_eq!(level.block_at(BlockPos::new(100, 64, -100)), air);
    }

    #[test]
    fn flat_level_surface() {
        let level = Level::flat(1);
        assert_eq!(level.chunk_count(), 9);
        assert_eq!(
            level.block_name(BlockPos::new(-5, 3, 12)),
            Some("minecraft:grass_block")
        );
        assert_eq!(
            level.block_name(BlockPos::new(-5, 4, 12)),
            Some("minecraft:air")
        );
    }

    #[test]
    fn set_block_negative_coordinates() {
        let mut level = Level::new();
        let pos = BlockPos::new(-17, 70, -1);
        level.set_block_named(pos, "minecraft:glass").unwrap();
        assert_eq!(level.block_name(pos), Some("minecraft:glass"));
        assert_eq!(
            level.block_name(BlockPos::new(-1, 70, -1)),
            Some("minecraft:air")
        );
    }

    #[test]
    fn set_block_out_of_range() {
        let mut level = Level::new();
        let air = level.registry().air();
        assert!(matches!(
            level.set_block(BlockPos::new(0, 400, 0), air),
            Err(WorldError::OutOfBuildRange { .. })
        ));
    }

    #[test]
    fn destroy_block_emits_event() {
        let mut level = Level::flat(0);
        let pos = BlockPos::new(2, 4, 2);
        level.set_block_named(pos, "minecraft:glass").unwrap();
        let glass = level.block_at(pos);

        assert!(level.destroy_block(pos, true));
        assert!(level.registry().is_air(level.block_at(pos)));
        assert_eq!(
            level.drain_events(),
            vec![LevelEvent::BlockDestroyed {
                pos,
                previous: glass,
                drop_items: true
            }]
        );

        // Nothing left to destroy
        assert!(!level.destroy_block(pos, true));
        assert!(level.drain_events().is_empty());
    }

    #[test]
    fn advance_tick_counts() {
        let mut level = Level::new();
        assert_eq!(level.current_tick(), 0);
        assert_eq!(level.advance_tick(), 1);
        assert_eq!(level.advance_tick(), 2);
        assert_eq!(level.current_tick(), 2);
    }

    #[test]
    fn sound_identifiers() {
        assert_eq!(BlockSound::GlassHit.identifier(), "block.glass.hit");
        assert_eq!(BlockSound::GlassBreak.identifier(), "block.glass.break");
        assert_eq!(BlockSound::GlassBreak.category(), "blocks");
    }
}
