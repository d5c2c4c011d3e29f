//! Mob type definitions.
//!
//! Provides a registry of known mob types with their stats, hitbox dimensions
//! and the AI capabilities the spawn hook keys off.

/// Optional AI capabilities granted at spawn time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobCapabilities {
    /// Gets the glass-breaking behavior.
    pub breaks_glass: bool,
}

/// Definition of a mob type.
#[derive(Debug, Clone)]
pub struct MobDefinition {
    /// Identifier, e.g. `"minecraft:zombie"`.
    pub type_id: String,
    /// Display name, e.g. `"Zombie"`.
    pub display_name: String,
    pub movement_speed: f32,
    /// Bounding box width.
    pub bb_width: f32,
    /// Bounding box height.
    pub bb_height: f32,
    pub eye_height: f32,
    pub capabilities: MobCapabilities,
}

/// Registry of supported mob types.
pub struct MobRegistry {
    mobs: Vec<MobDefinition>,
}

impl Default for MobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn zombie_like(type_id: &str, display_name: &str, bb_width: f32) -> MobDefinition {
    MobDefinition {
        type_id: type_id.into(),
        display_name: display_name.into(),
        movement_speed: 0.23,
        bb_width,
        bb_height: 1.95,
        eye_height: 1.74,
        capabilities: MobCapabilities { breaks_glass: true },
    }
}

impl MobRegistry {
    /// Build the registry with all known mob types.
    pub fn new() -> Self {
        Self {
            mobs: vec![
                zombie_like("minecraft:zombie", "Zombie", 0.6),
                zombie_like("minecraft:husk", "Husk", 0.6),
                zombie_like("minecraft:zombie_villager", "Zombie Villager", 0.6),
                zombie_like("minecraft:zombie_pigman", "Zombie Pigman", 0.6),
                MobDefinition {
                    type_id: "minecraft:skeleton".into(),
                    display_name: "Skeleton".into(),
                    movement_speed: 0.25,
                    bb_width: 0.6,
                    bb_height: 1.99,
                    eye_height: 1.74,
                    capabilities: MobCapabilities::default(),
                },
                MobDefinition {
                    type_id: "minecraft:cow".into(),
                    display_name: "Cow".into(),
                    movement_speed: 0.2,
                    bb_width: 0.9,
                    bb_height: 1.4,
                    eye_height: 1.3,
                    capabilities: MobCapabilities::default(),
                },
            ],
        }
    }

    /// Look up a mob definition by its type identifier.
    pub fn get(&self, type_id: &str) -> Option<&MobDefinition> {
        self.mobs.iter().find(|m| m.type_id == type_id)
    }

    /// All known mob definitions.
    pub fn all(&self) -> &[MobDefinition] {
        &self.mobs
    }

    /// Register a custom mob type. Replaces an existing definition with the same ID.
    pub fn register_mob(&mut self, def: MobDefinition) {
        self.mobs.retain(|m| m.type_id != def.type_id);
        self.mobs.push(def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_6_mobs() {
        let reg = MobRegistry::new();
        assert_eq!(reg.all().len(), 6);
    }

    #[test]
    fn get_zombie() {
        let reg = MobRegistry::new();
        let zombie = reg.get("minecraft:zombie").unwrap();
        assert_eq!(zombie.display_name, "Zombie");
        assert!((zombie.eye_height - 1.74).abs() < 0.001);
        assert!(zombie.capabilities.breaks_glass);
    }

    #[test]
    fn get_unknown_none() {
        let reg = MobRegistry::new();
        assert!(reg.get("minecraft:ender_dragon").is_none());
    }

    #[test]
    fn zombie_family_breaks_glass() {
        let reg = MobRegistry::new();
        for id in [
            "minecraft:zombie",
            "minecraft:husk",
            "minecraft:zombie_villager",
            "minecraft:zombie_pigman",
        ] {
            assert!(reg.get(id).unwrap().capabilities.breaks_glass, "{id}");
        }
    }

    #[test]
    fn others_do_not_break_glass() {
        let reg = MobRegistry::new();
        assert!(!reg.get("minecraft:skeleton").unwrap().capabilities.breaks_glass);
        assert!(!reg.get("minecraft:cow").unwrap().capabilities.breaks_glass);
    }

    #[test]
    fn register_custom_mob() {
        let mut reg = MobRegistry::new();
        reg.register_mob(MobDefinition {
            type_id: "custom:drowned".into(),
            display_name: "Drowned".into(),
            movement_speed: 0.2,
            bb_width: 0.6,
            bb_height: 1.95,
            eye_height: 1.74,
            capabilities: MobCapabilities { breaks_glass: true },
        });
        assert_eq!(reg.all().len(), 7);
        assert!(reg.get("custom:drowned").unwrap().capabilities.breaks_glass);
    }

    #[test]
    fn register_replaces_existing() {
        let mut reg = MobRegistry::new();
        let mut cow = reg.get("minecraft:cow").unwrap().clone();
        cow.capabilities.breaks_glass = true;
        reg.register_mob(cow);
        assert_eq!(reg.all().len(), 6);
        assert!(reg.get("minecraft:cow").unwrap().capabilities.breaks_glass);
    }
}
