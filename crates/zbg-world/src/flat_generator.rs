//! Flat world chunk generator.
//!
//! - Y = 0: Bedrock
//! - Y = 1-2: Dirt
//! - Y = 3: Grass Block
//! - Y = 4+: Air

use crate::block_hash::FlatWorldBlocks;
use crate::chunk::ChunkColumn;

/// Feet Y of anything standing on the flat world surface.
pub const FLAT_SURFACE_Y: i32 = 4;

/// Generate a flat world chunk column at the given chunk coordinates.
pub fn generate_flat_chunk(x: i32, z: i32, blocks: &FlatWorldBlocks) -> ChunkColumn {
    let mut column = ChunkColumn::new_filled(x, z, blocks.air);

    for lx in 0..16 {
        for lz in 0..16 {
            column.set_block_world(lx, 0, lz, blocks.bedrock);
            column.set_block_world(lx, 1, lz, blocks.dirt);
            column.set_block_world(lx, 2, lz, blocks.dirt);
            column.set_block_world(lx, 3, lz, blocks.grass_block);
        }
    }

    column
}
