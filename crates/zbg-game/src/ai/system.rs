//! AI tick system: evaluates behaviors and applies outputs to ECS state.

use bevy_ecs::prelude::*;
use tracing::{debug, trace};
use zbg_world::{BlockView, LevelAccess, Vec3};

use crate::components::*;
use crate::glass_breaking::GlassBreakTracker;

use super::behavior::{BehaviorContext, BehaviorOutput, BehaviorType, PlayerSnapshot};
use super::brain::BehaviorList;
use super::navigation;

/// Mob snapshot for AI evaluation.
struct MobSnapshot {
    entity: Entity,
    runtime_id: u64,
    position: Vec3,
    eye_height: f32,
    bounds: BoundingBox,
    on_ground: bool,
}

/// Runs one think-step for every mob with a BehaviorList.
///
/// Behaviors only see a read-only view of the level; their requests are
/// applied afterwards, including any glass break starts.
pub fn system_ai_tick<L: LevelAccess>(
    world: &mut World,
    level: &mut L,
    glass: &mut GlassBreakTracker,
) {
    // Step 1: Snapshot all players, in join order
    let mut players: Vec<PlayerSnapshot> = {
        let mut q = world
            .query_filtered::<(&EntityId, &Position, &BoundingBox, &EyeHeight), With<Player>>();
        q.iter(world)
            .map(|(eid, pos, bb, eye)| PlayerSnapshot {
                runtime_id: eid.runtime_id,
                position: pos.0,
                eye: eye.eye(pos.0),
                bounds: bb.aabb_at(pos.0),
            })
            .collect()
    };
    players.sort_by_key(|p| p.runtime_id);

    // Step 2: Snapshot all mob entities
    let mut mobs: Vec<MobSnapshot> = {
        let mut q = world.query_filtered::<(
            Entity,
            &EntityId,
            &Position,
            &EyeHeight,
            &BoundingBox,
            &OnGround,
        ), (With<Mob>, With<BehaviorList>)>();
        q.iter(world)
            .map(|(entity, eid, pos, eye, bb, on_ground)| MobSnapshot {
                entity,
                runtime_id: eid.runtime_id,
                position: pos.0,
                eye_height: eye.0,
                bounds: *bb,
                on_ground: on_ground.0,
            })
            .collect()
    };
    mobs.sort_by_key(|m| m.runtime_id);

    let current_tick = level.current_tick();

    // Step 3: Evaluate behaviors for each mob
    let mut actions: Vec<(Entity, u64, Vec3, BehaviorOutput)> = Vec::with_capacity(mobs.len());
    {
        let blocks: &dyn BlockView = &*level;
        for mob in &mobs {
            let eye = Vec3::new(mob.position.x, mob.position.y + mob.eye_height, mob.position.z);
            let ctx = BehaviorContext {
                mob_runtime_id: mob.runtime_id,
                mob_position: mob.position,
                mob_eye: eye,
                mob_bounds: mob.bounds.aabb_at(mob.position),
                mob_on_ground: mob.on_ground,
                current_tick,
                players: &players,
                blocks,
            };

            let Some(mut blist) = world.get_mut::<BehaviorList>(mob.entity) else {
                continue;
            };
            let output = evaluate_behaviors(&mut blist, &ctx);
            actions.push((mob.entity, mob.runtime_id, eye, output));
        }
    }

    // Step 4: Apply outputs to ECS state
    for (entity, runtime_id, eye, output) in actions {
        if output.stop_moving {
            if let Some(mut nav) = world.get_mut::<Navigation>(entity) {
                nav.goal = None;
            }
            if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
                vel.0.x = 0.0;
                vel.0.z = 0.0;
            }
        }

        if let Some(request) = output.move_to {
            if let Some(mut nav) = world.get_mut::<Navigation>(entity) {
                nav.goal = Some(request.target);
                nav.speed = request.speed;
            }
        }

        if let Some(look) = output.look_at {
            if let Some(mut rot) = world.get_mut::<Rotation>(entity) {
                let (head_yaw, pitch) = navigation::turn_head(rot.head_yaw, rot.pitch, eye, &look);
                rot.head_yaw = head_yaw;
                rot.pitch = pitch;
            }
        }

        for pos in output.break_blocks {
            if !glass.start_breaking(level, pos, runtime_id) {
                trace!("Mob {} hit glass at {} (already breaking)", runtime_id, pos);
            }
        }
    }
}

/// Evaluate all behaviors in a BehaviorList and produce a combined output.
///
/// Movement behaviors share one slot. The eligible behavior with the lowest
/// priority number holds it; the running one keeps it on a tie. A behavior
/// that takes the slot is started and then ticked in the same think-step.
fn evaluate_behaviors(blist: &mut BehaviorList, ctx: &BehaviorContext) -> BehaviorOutput {
    let mut combined = BehaviorOutput::default();

    // 1. Movement
    let mut best_mv: Option<usize> = None;
    for (i, b) in blist.behaviors.iter().enumerate() {
        if b.behavior_type() != BehaviorType::Movement {
            continue;
        }
        let running = blist.active_movement == Some(i);
        let eligible = if running {
            b.should_continue(ctx)
        } else {
            b.can_start(ctx)
        };
        if !eligible {
            continue;
        }
        let wins = match best_mv {
            None => true,
            Some(j) => {
                let (p, q) = (b.priority(), blist.behaviors[j].priority());
                p < q || (p == q && running)
            }
        };
        if wins {
            best_mv = Some(i);
        }
    }

    if best_mv != blist.active_movement {
        if let Some(old) = blist.active_movement {
            blist.behaviors[old].stop();
            debug!(
                "Mob {} stopped {}",
                ctx.mob_runtime_id,
                blist.behaviors[old].name()
            );
            if best_mv.is_none() {
                combined.stop_moving = true;
            }
        }
        if let Some(new) = best_mv {
            let behavior = &mut blist.behaviors[new];
            debug!("Mob {} started {}", ctx.mob_runtime_id, behavior.name());
            let output = behavior.start(ctx);
            merge_output(&mut combined, output);
            let output = behavior.tick(ctx);
            merge_output(&mut combined, output);
        }
        blist.active_movement = best_mv;
    } else if let Some(idx) = best_mv {
        let output = blist.behaviors[idx].tick(ctx);
        merge_output(&mut combined, output);
    }

    // 2. Passive behaviors (all that can run)
    let mut new_passives = Vec::new();
    for (i, b) in blist.behaviors.iter().enumerate() {
        if b.behavior_type() != BehaviorType::Passive {
            continue;
        }
        let was_active = blist.active_passives.contains(&i);
        if (was_active && b.should_continue(ctx)) || (!was_active && b.can_start(ctx)) {
            new_passives.push(i);
        }
    }

    for &old_idx in &blist.active_passives {
        if !new_passives.contains(&old_idx) {
            blist.behaviors[old_idx].stop();
        }
    }

    for &idx in &new_passives {
        if !blist.active_passives.contains(&idx) {
            let output = blist.behaviors[idx].start(ctx);
            merge_output(&mut combined, output);
        }
        let output = blist.behaviors[idx].tick(ctx);
        merge_output(&mut combined, output);
    }
    blist.active_passives = new_passives;

    combined
}

/// Merge a behavior output into the combined output.
///
/// The first look target wins, so the movement behavior's gaze beats a passive one.
fn merge_output(combined: &mut BehaviorOutput, output: BehaviorOutput) {
    if output.move_to.is_some() {
        combined.move_to = output.move_to;
    }
    if output.stop_moving {
        combined.stop_moving = true;
    }
    if combined.look_at.is_none() {
        combined.look_at = output.look_at;
    }
    combined.break_blocks.extend(output.break_blocks);
}
