//! Behavior lists handed to mobs when they spawn.

use super::behavior::Behavior;
use super::behaviors::{LookAtPlayer, RandomStroll};
use super::break_glass::BreakGlass;
use crate::config::GlassBreakConfig;
use crate::mob_registry::MobDefinition;

/// Range at which idle mobs turn to watch a player.
const LOOK_RANGE: f32 = 8.0;

/// Build the behavior list for a freshly spawned mob.
///
/// Every mob strolls and watches players. Mobs whose definition carries the
/// `breaks_glass` capability also get [`BreakGlass`], which outranks strolling
/// for the movement slot.
pub fn create_behaviors(
    def: &MobDefinition,
    config: &GlassBreakConfig,
    stroll_seed: u64,
) -> Vec<Box<dyn Behavior>> {
    let mut behaviors: Vec<Box<dyn Behavior>> = Vec::new();
    if def.capabilities.breaks_glass {
        behaviors.push(Box::new(BreakGlass::new(config)));
    }
    behaviors.push(Box::new(RandomStroll::new(stroll_seed)));
    behaviors.push(Box::new(LookAtPlayer::new(LOOK_RANGE)));
    behaviors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::behavior::BehaviorType;
    use crate::mob_registry::MobRegistry;

    fn names(behaviors: &[Box<dyn Behavior>]) -> Vec<&'static str> {
        behaviors.iter().map(|b| b.name()).collect()
    }

    #[test]
    fn zombie_gets_break_glass() {
        let reg = MobRegistry::new();
        let list = create_behaviors(
            reg.get("minecraft:zombie").unwrap(),
            &GlassBreakConfig::default(),
            0,
        );
        assert_eq!(
            names(&list),
            vec!["break_glass", "random_stroll", "look_at_player"]
        );
        assert_eq!(list[0].behavior_type(), BehaviorType::Movement);
        assert_eq!(list[0].priority(), 2);
    }

    #[test]
    fn skeleton_does_not() {
        let reg = MobRegistry::new();
        let list = create_behaviors(
            reg.get("minecraft:skeleton").unwrap(),
            &GlassBreakConfig::default(),
            0,
        );
        assert_eq!(names(&list), vec!["random_stroll", "look_at_player"]);
    }

    #[test]
    fn configured_priority_is_used() {
        let reg = MobRegistry::new();
        let config = GlassBreakConfig {
            priority: 5,
            ..Default::default()
        };
        let list = create_behaviors(reg.get("minecraft:husk").unwrap(), &config, 0);
        assert_eq!(list[0].priority(), 5);
    }
}
