//! Block property registry mapping runtime IDs (FNV-1a hashes) to block info.
//!
//! Unknown blocks default to solid so that unrecognised terrain blocks sight
//! and movement rather than letting mobs see or walk through it.

use std::collections::HashMap;

use crate::block_hash::hash_block_name;
use crate::error::WorldError;
use crate::material;

/// Properties for a single block type.
#[derive(Debug, Clone)]
pub struct BlockInfo {
    /// Namespaced block identifier, e.g. `"minecraft:stone"`.
    pub name: &'static str,
    /// Whether entities collide with this block (non-empty collision box).
    pub is_solid: bool,
}

/// Registry mapping block runtime ID hashes to block info.
pub struct BlockRegistry {
    blocks: HashMap<u32, &'static BlockInfo>,
    air: u32,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Build the registry by hashing each block name and mapping to its info.
    pub fn new() -> Self {
        let mut blocks = HashMap::with_capacity(BLOCK_DATA.len());
        for info in BLOCK_DATA {
            blocks.insert(hash_block_name(info.name), info);
        }
        Self {
            blocks,
            air: hash_block_name("minecraft:air"),
        }
    }

    /// Runtime ID of air.
    pub fn air(&self) -> u32 {
        self.air
    }

    /// Look up full block info by runtime ID hash.
    pub fn get(&self, hash: u32) -> Option<&'static BlockInfo> {
        self.blocks.get(&hash).copied()
    }

    /// Resolve a block identifier to its runtime ID.
    pub fn runtime_id(&self, name: &str) -> Result<u32, WorldError> {
        let hash = hash_block_name(name);
        if self.blocks.contains_key(&hash) {
            Ok(hash)
        } else {
            Err(WorldError::UnknownBlock(name.to_string()))
        }
    }

    /// Identifier for a runtime ID, if known.
    pub fn name(&self, hash: u32) -> Option<&'static str> {
        self.get(hash).map(|info| info.name)
    }

    pub fn is_air(&self, hash: u32) -> bool {
        hash == self.air
    }

    /// Check if a block is solid. Defaults to `true` for unknown blocks.
    pub fn is_solid(&self, hash: u32) -> bool {
        self.get(hash).map(|info| info.is_solid).unwrap_or(true)
    }

    /// Whether the block is glass. Unknown runtime IDs are never glass.
    pub fn is_breakable_for_sight(&self, hash: u32) -> bool {
        self.name(hash)
            .map(material::is_breakable_for_sight)
            .unwrap_or(false)
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// Helper macro to reduce boilerplate in the data array.
macro_rules! block {
    ($name:expr, solid) => {
        BlockInfo {
            name: $name,
            is_solid: true,
        }
    };
    ($name:expr, non_solid) => {
        BlockInfo {
            name: $name,
            is_solid: false,
        }
    };
}

/// Block properties for everything the level can hold.
static BLOCK_DATA: &[BlockInfo] = &[
    // ===== Special =====
    block!("minecraft:air", non_solid),
    block!("minecraft:bedrock", solid),
    block!("minecraft:barrier", solid),
    block!("minecraft:light_block", non_solid),
    block!("minecraft:structure_void", non_solid),
    // ===== Terrain =====
    block!("minecraft:stone", solid),
    block!("minecraft:cobblestone", solid),
    block!("minecraft:dirt", solid),
    block!("minecraft:grass_block", solid),
    block!("minecraft:sand", solid),
    block!("minecraft:gravel", solid),
    block!("minecraft:water", non_solid),
    block!("minecraft:lava", non_solid),
    // ===== Building =====
    block!("minecraft:oak_planks", solid),
    block!("minecraft:oak_log", solid),
    block!("minecraft:bricks", solid),
    block!("minecraft:stone_bricks", solid),
    block!("minecraft:iron_bars", solid),
    block!("minecraft:oak_fence", solid),
    block!("minecraft:oak_door", solid),
    // ===== Decoration (no collision) =====
    block!("minecraft:short_grass", non_solid),
    block!("minecraft:tall_grass", non_solid),
    block!("minecraft:dandelion", non_solid),
    block!("minecraft:poppy", non_solid),
    block!("minecraft:torch", non_solid),
    block!("minecraft:rail", non_solid),
    block!("minecraft:snow_layer", non_solid),
    block!("minecraft:vine", non_solid),
    // ===== Glass =====
    block!("minecraft:glass", solid),
    block!("minecraft:glass_pane", solid),
    block!("minecraft:tinted_glass", solid),
    block!("minecraft:white_stained_glass", solid),
    block!("minecraft:orange_stained_glass", solid),
    block!("minecraft:magenta_stained_glass", solid),
    block!("minecraft:light_blue_stained_glass", solid),
    block!("minecraft:yellow_stained_glass", solid),
    block!("minecraft:lime_stained_glass", solid),
    block!("minecraft:pink_stained_glass", solid),
    block!("minecraft:gray_stained_glass", solid),
    block!("minecraft:light_gray_stained_glass", solid),
    block!("minecraft:cyan_stained_glass", solid),
    block!("minecraft:purple_stained_glass", solid),
    block!("minecraft:blue_stained_glass", solid),
    block!("minecraft:brown_stained_glass", solid),
    block!("minecraft:green_stained_glass", solid),
    block!("minecraft:red_stained_glass", solid),
    block!("minecraft:black_stained_glass", solid),
    block!("minecraft:white_stained_glass_pane", solid),
    block!("minecraft:orange_stained_glass_pane", solid),
    block!("minecraft:magenta_stained_glass_pane", solid),
    block!("minecraft:light_blue_stained_glass_pane", solid),
    block!("minecraft:yellow_stained_glass_pane", solid),
    block!("minecraft:lime_stained_glass_pane", solid),
    block!("minecraft:pink_stained_glass_pane", solid),
    block!("minecraft:gray_stained_glass_pane", solid),
    block!("minecraft:light_gray_stained_glass_pane", solid),
    block!("minecraft:cyan_stained_glass_pane", solid),
    block!("minecraft:purple_stained_glass_pane", solid),
    block!("minecraft:blue_stained_glass_pane", solid),
    block!("minecraft:brown_stained_glass_pane", solid),
    block!("minecraft:green_stained_glass_pane", solid),
    block!("minecraft:red_stained_glass_pane", solid),
    block!("minecraft:black_stained_glass_pane", solid),
];
