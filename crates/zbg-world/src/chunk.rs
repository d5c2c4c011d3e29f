//! Chunk and sub-chunk block storage.

/// Total sub-chunks for Overworld: Y range [-64, 319] = 384 blocks / 16 = 24.
pub const OVERWORLD_SUB_CHUNK_COUNT: usize = 24;

/// Minimum Y coordinate in the Overworld.
pub const OVERWORLD_MIN_Y: i32 = -64;

/// One past the maximum Y coordinate in the Overworld.
pub const OVERWORLD_MAX_Y: i32 = OVERWORLD_MIN_Y + (OVERWORLD_SUB_CHUNK_COUNT as i32) * 16;

/// A 16x16x16 sub-chunk with a single block storage layer.
#[derive(Clone)]
pub struct SubChunk {
    /// Palette indices for each block, stored in XZY order: `(x*16 + z)*16 + y`.
    pub blocks: [u16; 4096],
    /// Palette of block runtime IDs (FNV-1a hashes).
    pub palette: Vec<u32>,
}

impl SubChunk {
    /// Create a sub-chunk filled entirely with a single block.
    pub fn new_single(runtime_id: u32) -> Self {
        Self {
            blocks: [0; 4096],
            palette: vec![runtime_id],
        }
    }

    /// Set a block at local coordinates within this sub-chunk.
    /// `x`, `y`, `z` must each be in `[0, 15]`.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, runtime_id: u32) {
        debug_assert!(x < 16 && y < 16 && z < 16);
        let palette_index = match self.palette.iter().position(|&id| id == runtime_id) {
            Some(idx) => idx,
            None => {
                self.palette.push(runtime_id);
                self.palette.len() - 1
            }
        };
        let block_index = (x * 16 + z) * 16 + y;
        self.blocks[block_index] = palette_index as u16;
    }

    /// Get the runtime ID of the block at local coordinates.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> u32 {
        let block_index = (x * 16 + z) * 16 + y;
        let palette_index = self.blocks[block_index] as usize;
        self.palette[palette_index]
    }
}

/// A full chunk column (16x384x16 for Overworld).
pub struct ChunkColumn {
    pub x: i32,
    pub z: i32,
    pub sub_chunks: Vec<SubChunk>,
}

impl ChunkColumn {
    /// A column filled with a single block (usually air).
    pub fn new_filled(x: i32, z: i32, runtime_id: u32) -> Self {
        Self {
            x,
            z,
            sub_chunks: vec![SubChunk::new_single(runtime_id); OVERWORLD_SUB_CHUNK_COUNT],
        }
    }

    /// Get a block by local X/Z and world Y. `None` outside the build range.
    pub fn get_block_world(&self, lx: usize, y: i32, lz: usize) -> Option<u32> {
        let (index, ly) = sub_chunk_index(y)?;
        Some(self.sub_chunks[index].get_block(lx, ly, lz))
    }

    /// Set a block by local X/Z and world Y. Returns `false` outside the build range.
    pub fn set_block_world(&mut self, lx: usize, y: i32, lz: usize, runtime_id: u32) -> bool {
        match sub_chunk_index(y) {
            Some((index, ly)) => {
                self.sub_chunks[index].set_block(lx, ly, lz, runtime_id);
                true
            }
            None => false,
        }
    }
}

/// Map a world Y to `(sub_chunk_index, local_y)`.
fn sub_chunk_index(y: i32) -> Option<(usize, usize)> {
    if !(OVERWORLD_MIN_Y..OVERWORLD_MAX_Y).contains(&y) {
        return None;
    }
    let offset = (y - OVERWORLD_MIN_Y) as usize;
    Some((offset / 16, offset % 16))
}
