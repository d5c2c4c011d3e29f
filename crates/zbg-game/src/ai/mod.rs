//! Mob AI: behavior scheduling, glass breaking, navigation, and the spawn hook.

pub mod behavior;
pub mod behaviors;
pub mod brain;
pub mod break_glass;
pub mod navigation;
pub mod spawn_hook;
pub mod system;
