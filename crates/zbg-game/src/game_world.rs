//! ECS game world: bevy_ecs World, entity management, tick systems, and event bus.

use bevy_ecs::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use zbg_world::{Aabb, BlockPos, BlockView, Level, LevelAccess, LevelEvent, Vec3};

use crate::ai::brain::BehaviorList;
use crate::ai::navigation;
use crate::ai::spawn_hook;
use crate::ai::system::system_ai_tick;
use crate::components::*;
use crate::config::GlassBreakConfig;
use crate::error::GameError;
use crate::glass_breaking::{BreakOutcome, GlassBreakTracker};
use crate::mob_registry::MobRegistry;

/// Player hitbox width.
pub const PLAYER_WIDTH: f32 = 0.6;

/// Player hitbox height when standing.
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Eye offset above feet.
pub const PLAYER_EYE_HEIGHT: f32 = 1.62;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// Entity ID allocator (shared by mobs and players).
#[derive(Resource)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }

    /// Allocate the next runtime ID.
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Current value (next ID that will be allocated).
    pub fn current(&self) -> u64 {
        self.next
    }
}

// ---------------------------------------------------------------------------
// Game events
// ---------------------------------------------------------------------------

/// Events produced by the game world.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new mob was spawned.
    MobSpawned {
        runtime_id: u64,
        mob_type: String,
        position: Vec3,
    },
    /// A mob changed position this tick.
    MobMoved {
        runtime_id: u64,
        position: Vec3,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        on_ground: bool,
    },
    /// An entity was removed (despawn or disconnect).
    EntityRemoved { runtime_id: u64 },
    /// Sound, particle, or block change from the level.
    Level(LevelEvent),
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world plus the level it plays out in.
pub struct GameWorld {
    pub world: World,
    pub level: Level,
    pub glass: GlassBreakTracker,
    pub mob_registry: MobRegistry,
    pub config: GlassBreakConfig,
    rng: StdRng,
}

impl GameWorld {
    /// Create a game world over `level`. `seed` drives every random choice mobs make.
    pub fn new(level: Level, config: GlassBreakConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(EntityIdAllocator::new(1));

        Ok(Self {
            world,
            level,
            glass: GlassBreakTracker::from_config(&config),
            mob_registry: MobRegistry::new(),
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Run one game tick: AI, movement, then the glass tracker at end of step.
    pub fn tick(&mut self) -> Vec<BreakOutcome> {
        let tick = self.level.advance_tick();
        trace!("Game tick {}", tick);
        system_ai_tick(&mut self.world, &mut self.level, &mut self.glass);
        system_mob_movement(&mut self.world, &self.level);
        self.glass.tick(&mut self.level)
    }

    /// Drain all pending events: entity events first, then level effects.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events);
        events.extend(self.level.drain_events().into_iter().map(GameEvent::Level));
        events
    }

    /// Return the current tick count.
    pub fn current_tick(&self) -> u64 {
        self.level.current_tick()
    }

    /// Place a block by identifier.
    pub fn place_block(&mut self, pos: BlockPos, name: &str) -> Result<(), GameError> {
        self.level.set_block_named(pos, name)?;
        Ok(())
    }

    /// Spawn a mob entity and attach its behaviors. Returns the runtime ID.
    pub fn spawn_mob(&mut self, type_id: &str, position: Vec3) -> Result<u64, GameError> {
        let def = self
            .mob_registry
            .get(type_id)
            .ok_or_else(|| GameError::UnknownMobType(type_id.to_string()))?
            .clone();
        let runtime_id = self.world.resource_mut::<EntityIdAllocator>().allocate();
        let behaviors = spawn_hook::create_behaviors(&def, &self.config, self.rng.gen());

        self.world.spawn((
            EntityId { runtime_id },
            Position(position),
            Rotation::default(),
            Velocity::default(),
            OnGround(false),
            BoundingBox {
                width: def.bb_width,
                height: def.bb_height,
            },
            EyeHeight(def.eye_height),
            Mob,
            MobType(type_id.to_string()),
            MovementSpeed(def.movement_speed),
            Navigation::default(),
            BehaviorList::new(behaviors),
        ));

        debug!(
            "Spawned {} ({}) at {} (breaks glass: {})",
            def.display_name, runtime_id, position, def.capabilities.breaks_glass
        );
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::MobSpawned {
                runtime_id,
                mob_type: type_id.to_string(),
                position,
            });

        Ok(runtime_id)
    }

    /// Remove a mob by runtime_id. Returns `true` if found and removed.
    ///
    /// Glass it started breaking keeps breaking.
    pub fn remove_mob(&mut self, runtime_id: u64) -> bool {
        let Some(entity) = self.find_entity::<Mob>(runtime_id) else {
            return false;
        };
        self.world.despawn(entity);
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::EntityRemoved { runtime_id });
        true
    }

    /// Get a mob's feet position by runtime_id.
    pub fn mob_position(&mut self, runtime_id: u64) -> Option<Vec3> {
        let entity = self.find_entity::<Mob>(runtime_id)?;
        self.world.get::<Position>(entity).map(|p| p.0)
    }

    /// Get a mob's rotation by runtime_id.
    pub fn mob_rotation(&mut self, runtime_id: u64) -> Option<Rotation> {
        let entity = self.find_entity::<Mob>(runtime_id)?;
        self.world.get::<Rotation>(entity).copied()
    }

    /// Name of the behavior currently driving a mob's movement.
    pub fn active_movement(&mut self, runtime_id: u64) -> Option<&'static str> {
        let entity = self.find_entity::<Mob>(runtime_id)?;
        self.world
            .get::<BehaviorList>(entity)
            .and_then(|b| b.active_movement_name())
    }

    /// Runtime IDs of all mobs, in spawn order.
    pub fn mob_ids(&mut self) -> Vec<u64> {
        let mut query = self.world.query_filtered::<&EntityId, With<Mob>>();
        let mut ids: Vec<u64> = query.iter(&self.world).map(|e| e.runtime_id).collect();
        ids.sort_unstable();
        ids
    }

    /// Spawn a player standing at `position`. Returns the runtime ID.
    pub fn spawn_player(&mut self, position: Vec3) -> u64 {
        let runtime_id = self.world.resource_mut::<EntityIdAllocator>().allocate();
        self.world.spawn((
            EntityId { runtime_id },
            Position(position),
            BoundingBox {
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
            },
            EyeHeight(PLAYER_EYE_HEIGHT),
            Player,
        ));
        debug!("Player {} joined at {}", runtime_id, position);
        runtime_id
    }

    /// Move a player. Returns `false` if no such player.
    pub fn update_player_position(&mut self, runtime_id: u64, position: Vec3) -> bool {
        let Some(entity) = self.find_entity::<Player>(runtime_id) else {
            return false;
        };
        match self.world.get_mut::<Position>(entity) {
            Some(mut pos) => {
                pos.0 = position;
                true
            }
            None => false,
        }
    }

    /// Remove a player. Mobs targeting it drop the target on their next think-step.
    pub fn despawn_player(&mut self, runtime_id: u64) -> bool {
        let Some(entity) = self.find_entity::<Player>(runtime_id) else {
            return false;
        };
        self.world.despawn(entity);
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::EntityRemoved { runtime_id });
        true
    }

    fn find_entity<M: Component>(&mut self, runtime_id: u64) -> Option<Entity> {
        let mut query = self.world.query_filtered::<(Entity, &EntityId), With<M>>();
        query
            .iter(&self.world)
            .find(|(_, eid)| eid.runtime_id == runtime_id)
            .map(|(entity, _)| entity)
    }
}

// ---------------------------------------------------------------------------
// Systems (manual, called by GameWorld::tick)
// ---------------------------------------------------------------------------

/// Move mobs toward their navigation goal, apply gravity, and resolve
/// collisions one axis at a time. Emits `MobMoved` for every mob whose
/// position changed.
fn system_mob_movement<V: BlockView>(world: &mut World, blocks: &V) {
    const GRAVITY: f32 = 0.08;
    const AIR_DRAG: f32 = 0.98;
    const GROUND_DRAG: f32 = 0.91;
    // Below one block per tick so a landing is never skipped.
    const MAX_FALL: f32 = 0.9;
    const ARRIVE_DISTANCE: f32 = 0.1;

    let mut moves = Vec::new();
    let mut query = world.query_filtered::<(
        &EntityId,
        &mut Position,
        &mut Velocity,
        &mut OnGround,
        &mut Rotation,
        &mut Navigation,
        &MovementSpeed,
        &BoundingBox,
    ), With<Mob>>();

    for (eid, mut pos, mut vel, mut on_ground, mut rot, mut nav, speed, bb) in
        query.iter_mut(world)
    {
        let start = pos.0;

        match nav.goal {
            Some(goal)
                if navigation::distance_xz(start.x, start.z, goal.x, goal.z) >= ARRIVE_DISTANCE =>
            {
                let (vx, vz) = navigation::move_toward_flat(
                    start.x,
                    start.z,
                    goal.x,
                    goal.z,
                    speed.0 * nav.speed,
                );
                vel.0.x = vx;
                vel.0.z = vz;
                rot.yaw = navigation::yaw_toward(start.x, start.z, goal.x, goal.z);
            }
            Some(_) => {
                nav.goal = None;
                vel.0.x = 0.0;
                vel.0.z = 0.0;
            }
            None => {}
        }

        vel.0.y = ((vel.0.y - GRAVITY) * AIR_DRAG).max(-MAX_FALL);

        let mut next = start;

        let candidate = Vec3::new(next.x + vel.0.x, next.y, next.z);
        if collides(blocks, &bb.aabb_at(candidate)) {
            vel.0.x = 0.0;
        } else {
            next = candidate;
        }

        let candidate = Vec3::new(next.x, next.y, next.z + vel.0.z);
        if collides(blocks, &bb.aabb_at(candidate)) {
            vel.0.z = 0.0;
        } else {
            next = candidate;
        }

        let candidate = Vec3::new(next.x, next.y + vel.0.y, next.z);
        if collides(blocks, &bb.aabb_at(candidate)) {
            if vel.0.y < 0.0 {
                // Land on top of the block below
                next.y = candidate.y.floor() + 1.0;
                on_ground.0 = true;
            }
            vel.0.y = 0.0;
        } else {
            next = candidate;
            on_ground.0 = false;
        }

        if nav.goal.is_none() {
            vel.0.x *= GROUND_DRAG;
            vel.0.z *= GROUND_DRAG;
            if vel.0.x.abs() < 0.003 {
                vel.0.x = 0.0;
            }
            if vel.0.z.abs() < 0.003 {
                vel.0.z = 0.0;
            }
        }

        pos.0 = next;
        if start.distance_sq(&next) > 1e-8 {
            moves.push(GameEvent::MobMoved {
                runtime_id: eid.runtime_id,
                position: next,
                pitch: rot.pitch,
                yaw: rot.yaw,
                head_yaw: rot.head_yaw,
                on_ground: on_ground.0,
            });
        }
    }

    world.resource_mut::<OutgoingEvents>().events.extend(moves);
}

/// Whether any block overlapping `aabb` has a collision box.
fn collides<V: BlockView>(blocks: &V, aabb: &Aabb) -> bool {
    let registry = blocks.registry();
    aabb.intersecting_blocks()
        .any(|pos| registry.is_solid(blocks.block_at(pos)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
