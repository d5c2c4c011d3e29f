//! FNV-1a 32-bit block identifiers.
//!
//! A block's runtime ID is the FNV-1a hash of its namespaced identifier, so
//! the same name always maps to the same ID without a shared palette.

/// FNV-1a 32-bit offset basis.
const FNV1_32_INIT: u32 = 0x811c_9dc5;
/// FNV-1a 32-bit prime.
const FNV1_32_PRIME: u32 = 0x0100_0193;

/// Compute FNV-1a 32-bit hash of a byte slice.
pub fn fnv1a_32(data: &[u8]) -> u32 {
    let mut hash = FNV1_32_INIT;
    for &byte in data {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(FNV1_32_PRIME);
    }
    hash
}

/// Runtime ID for a block identifier such as `"minecraft:glass"`.
pub fn hash_block_name(name: &str) -> u32 {
    fnv1a_32(name.as_bytes())
}

/// Pre-computed block runtime IDs for the flat world.
#[derive(Debug, Clone)]
pub struct FlatWorldBlocks {
    pub air: u32,
    pub bedrock: u32,
    pub dirt: u32,
    pub grass_block: u32,
}

impl FlatWorldBlocks {
    /// Compute all block hashes needed for a flat world.
    pub fn compute() -> Self {
        Self {
            air: hash_block_name("minecraft:air"),
            bedrock: hash_block_name("minecraft:bedrock"),
            dirt: hash_block_name("minecraft:dirt"),
            grass_block: hash_block_name("minecraft:grass_block"),
        }
    }
}
