//! Cleanup system: removes dead actors and out-of-bounds projectiles.

use hecs::{Entity, World};

use skirmish_core::components::{Actor, Health, Position, Projectile};
use skirmish_core::constants::WORLD_RADIUS;
use skirmish_core::types::ActorId;

use crate::collision::CollisionWorld;
use crate::registry::ActorRegistry;

/// Despawn dead actors (with their colliders and registry entries) and
/// projectiles beyond the world boundary. Uses a pre-allocated buffer to
/// avoid per-tick allocation.
pub fn run(
    world: &mut World,
    registry: &mut ActorRegistry,
    collision: &mut CollisionWorld,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut dead_actors: Vec<ActorId> = Vec::new();

    for (entity, (actor, health)) in world.query_mut::<(&Actor, &Health)>() {
        if health.is_dead() {
            dead_actors.push(actor.id);
            despawn_buffer.push(entity);
        }
    }

    let radius_sq = WORLD_RADIUS * WORLD_RADIUS;
    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        let horizontal_sq = pos.0.x * pos.0.x + pos.0.y * pos.0.y;
        if horizontal_sq > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    // Registry and collision entries go at the same boundary as the entity.
    for id in dead_actors {
        collision.remove_actor(id);
        registry.unregister(id);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
