//! BehaviorList ECS component, holds a mob's AI behaviors.

use bevy_ecs::prelude::*;

use super::behavior::Behavior;

/// Holds the list of behaviors and tracks which are currently active.
#[derive(Component)]
pub struct BehaviorList {
    pub behaviors: Vec<Box<dyn Behavior>>,
    /// Index of the currently active movement behavior, or None.
    pub active_movement: Option<usize>,
    /// Indices of currently active passive behaviors.
    pub active_passives: Vec<usize>,
}

impl BehaviorList {
    /// Create a new BehaviorList from a list of behaviors.
    pub fn new(behaviors: Vec<Box<dyn Behavior>>) -> Self {
        Self {
            behaviors,
            active_movement: None,
            active_passives: Vec::new(),
        }
    }

    /// Whether a behavior with this name is in the list.
    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.iter().any(|b| b.name() == name)
    }

    /// Name of the movement behavior holding the movement slot.
    pub fn active_movement_name(&self) -> Option<&'static str> {
        self.active_movement
            .and_then(|i| self.behaviors.get(i))
            .map(|b| b.name())
    }
}

impl std::fmt::Debug for BehaviorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorList")
            .field("behavior_count", &self.behaviors.len())
            .field("active_movement", &self.active_movement)
            .field("active_passives", &self.active_passives)
            .finish()
    }
}
