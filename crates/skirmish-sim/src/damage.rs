//! Damage routing: health operations with event emission, point damage
//! through Damageable descriptors, and distance-falloff area damage.
//!
//! Health pools are mutated only through these functions, which emit the
//! damaged/healed/died events with true post-clamp amounts.

use glam::DVec3;
use hecs::World;

use skirmish_core::components::{Damageable, Health};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::ActorId;
use skirmish_core::weapons::AreaDamageConfig;

use crate::collision::WorldQuery;
use crate::registry::ActorRegistry;

/// Apply raw damage to an actor's health. Emits a damaged event carrying
/// the true (post-clamp) amount when it is positive, and the died event
/// exactly once, on the death transition.
pub fn apply_damage(
    world: &mut World,
    registry: &ActorRegistry,
    target: ActorId,
    amount: f64,
    source: Option<ActorId>,
    events: &mut Vec<CombatEvent>,
) {
    let Some(entity) = registry.entity(target) else {
        return;
    };
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return;
    };
    let true_damage = health.take_damage(amount);
    if true_damage > 0.0 {
        events.push(CombatEvent::Damaged {
            target,
            amount: true_damage,
            source,
        });
    }
    if health.settle_death() {
        events.push(CombatEvent::Died { actor: target });
    }
}

/// Restore an actor's health. Emits a healed event with the true amount
/// when it is positive.
pub fn heal(
    world: &mut World,
    registry: &ActorRegistry,
    target: ActorId,
    amount: f64,
    events: &mut Vec<CombatEvent>,
) {
    let Some(entity) = registry.entity(target) else {
        return;
    };
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return;
    };
    let true_heal = health.heal(amount);
    if true_heal > 0.0 {
        events.push(CombatEvent::Healed {
            target,
            amount: true_heal,
        });
    }
}

/// Force an actor's health to zero. Always emits a damaged event carrying
/// the full pool with no source, then the death transition if it fires.
pub fn kill(
    world: &mut World,
    registry: &ActorRegistry,
    target: ActorId,
    events: &mut Vec<CombatEvent>,
) {
    let Some(entity) = registry.entity(target) else {
        return;
    };
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return;
    };
    health.kill();
    events.push(CombatEvent::Damaged {
        target,
        amount: health.max,
        source: None,
    });
    if health.settle_death() {
        events.push(CombatEvent::Died { actor: target });
    }
}

/// Route damage through a collider's Damageable descriptor. The collider
/// multiplier applies only to point damage, and self-inflicted damage is
/// hard-zeroed.
pub fn inflict_damage(
    world: &mut World,
    registry: &ActorRegistry,
    damageable: &Damageable,
    damage: f64,
    is_area_damage: bool,
    source: Option<ActorId>,
    events: &mut Vec<CombatEvent>,
) {
    let mut total = damage;
    if !is_area_damage {
        total *= damageable.damage_multiplier;
    }
    if source == Some(damageable.health_owner) {
        total = 0.0;
    }
    apply_damage(world, registry, damageable.health_owner, total, source, events);
}

/// Overlap a sphere and damage each unique health once, scaled by the
/// falloff curve over normalized distance from the center. Several
/// colliders resolving to the same health count once; the first collider
/// found decides the falloff distance.
pub fn inflict_area_damage(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    config: &AreaDamageConfig,
    damage: f64,
    center: DVec3,
    mask: u32,
    source: Option<ActorId>,
    events: &mut Vec<CombatEvent>,
) {
    let mut unique: Vec<(Damageable, DVec3)> = Vec::new();
    for id in queries.overlap_sphere(center, config.radius, mask) {
        let Some(collider) = queries.collider(id) else {
            continue;
        };
        let Some(damageable) = collider.damageable else {
            continue;
        };
        if unique
            .iter()
            .any(|(seen, _)| seen.health_owner == damageable.health_owner)
        {
            continue;
        }
        unique.push((damageable, collider.world_center()));
    }

    for (damageable, collider_center) in &unique {
        let distance = collider_center.distance(center);
        let scaled = damage * config.falloff.evaluate(distance / config.radius);
        inflict_damage(world, registry, damageable, scaled, true, source, events);
    }
}
