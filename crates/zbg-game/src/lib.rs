//! Game logic: glass-breaking mob AI, the glass break tracker, and the ECS game world.

pub mod ai;
pub mod components;
pub mod config;
pub mod error;
pub mod game_world;
pub mod glass_breaking;
pub mod mob_registry;
pub mod sightline;

pub use config::GlassBreakConfig;
pub use error::GameError;
pub use game_world::{GameEvent, GameWorld};
pub use glass_breaking::{BreakOutcome, BreakRecord, GlassBreakTracker};
