//! Sightline checks that treat glass as transparent.
//!
//! Both walks sample the segment at fixed half-block steps, so an obstacle
//! thinner than the step can occasionally be skipped.

use zbg_world::{BlockPos, BlockRegistry, BlockView, Vec3};

/// Distance between samples along a ray (blocks).
pub const SAMPLE_STEP: f32 = 0.5;

/// Distance from the eye at which the glass search starts (blocks).
pub const GLASS_SEARCH_START: f32 = 1.0;

/// Whether `to` is visible from `from` when glass is ignored.
///
/// Samples from `SAMPLE_STEP` up to (not including) the full distance. A
/// sample blocks the view if its block is not air, not glass, and has a
/// collision box. A zero-length segment is always visible.
pub fn has_sight_through_glass<V: BlockView + ?Sized>(view: &V, from: Vec3, to: Vec3) -> bool {
    let Some(direction) = (to - from).normalize() else {
        return true;
    };
    let distance = from.distance(&to);
    let registry = view.registry();

    let mut d = SAMPLE_STEP;
    while d < distance {
        let pos = BlockPos::from_vec3(&(from + direction * d));
        if blocks_sight(registry, view.block_at(pos)) {
            return false;
        }
        d += SAMPLE_STEP;
    }
    true
}

/// First glass block along the ray from `from` toward `to`, looking no
/// further than `max_range` or the distance to `to`, whichever is smaller.
pub fn find_glass_on_ray<V: BlockView + ?Sized>(
    view: &V,
    from: Vec3,
    to: Vec3,
    max_range: f32,
) -> Option<BlockPos> {
    let direction = (to - from).normalize()?;
    let limit = from.distance(&to).min(max_range);
    let registry = view.registry();

    let mut d = GLASS_SEARCH_START;
    while d < limit {
        let pos = BlockPos::from_vec3(&(from + direction * d));
        if registry.is_breakable_for_sight(view.block_at(pos)) {
            return Some(pos);
        }
        d += SAMPLE_STEP;
    }
    None
}

fn blocks_sight(registry: &BlockRegistry, state: u32) -> bool {
    !registry.is_air(state) && !registry.is_breakable_for_sight(state) && registry.is_solid(state)
}
