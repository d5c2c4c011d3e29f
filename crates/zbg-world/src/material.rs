//! Glass classification.
//!
//! Glass is the one material that blocks movement but not sight, and that
//! hostile mobs are allowed to smash through.

/// Shape of a glass block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlassKind {
    /// Full glass cube.
    Block,
    /// Thin glass pane.
    Pane,
}

/// Classify a block identifier as glass. Plain, stained and tinted variants
/// of both blocks and panes count; anything else is `None`.
pub fn glass_kind(name: &str) -> Option<GlassKind> {
    let id = name.strip_prefix("minecraft:")?;
    match id {
        "glass" | "stained_glass" | "tinted_glass" => Some(GlassKind::Block),
        "glass_pane" | "stained_glass_pane" | "tinted_glass_pane" => Some(GlassKind::Pane),
        _ if id.ends_with("_stained_glass") => Some(GlassKind::Block),
        _ if id.ends_with("_stained_glass_pane") => Some(GlassKind::Pane),
        _ => None,
    }
}

/// Whether a block with this identifier may be seen through and broken.
pub fn is_breakable_for_sight(name: &str) -> bool {
    glass_kind(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_glass_and_pane() {
        assert_eq!(glass_kind("minecraft:glass"), Some(GlassKind::Block));
        assert_eq!(glass_kind("minecraft:glass_pane"), Some(GlassKind::Pane));
    }

    #[test]
    fn stained_and_tinted_variants() {
        assert!(is_breakable_for_sight("minecraft:red_stained_glass"));
        assert!(is_breakable_for_sight("minecraft:light_blue_stained_glass_pane"));
        assert!(is_breakable_for_sight("minecraft:stained_glass"));
        assert!(is_breakable_for_sight("minecraft:tinted_glass"));
        assert_eq!(
            glass_kind("minecraft:black_stained_glass_pane"),
            Some(GlassKind::Pane)
        );
    }

    #[test]
    fn non_glass_is_rejected() {
        assert!(!is_breakable_for_sight("minecraft:air"));
        assert!(!is_breakable_for_sight("minecraft:stone"));
        assert!(!is_breakable_for_sight("minecraft:iron_bars"));
        assert!(!is_breakable_for_sight("minecraft:glass_bottle"));
        assert!(!is_breakable_for_sight("glass"));
        assert!(!is_breakable_for_sight(""));
    }
}
