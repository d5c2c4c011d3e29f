//! World model: positions, blocks, chunk storage, and the level collaborator traits.

pub mod block_hash;
pub mod block_registry;
pub mod chunk;
pub mod error;
pub mod flat_generator;
pub mod level;
pub mod material;
pub mod pos;

pub use block_registry::BlockRegistry;
pub use error::WorldError;
pub use level::{BlockSound, BlockView, Level, LevelAccess, LevelEvent, ParticleKind};
pub use pos::{Aabb, BlockPos, Vec3};
