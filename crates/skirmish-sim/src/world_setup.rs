//! Actor spawn factories.
//!
//! Builds the component bundle, collider set, inventory, and registry
//! entry for a new actor from a plain spec.

use glam::DVec3;
use hecs::{Entity, World};

use skirmish_core::components::{Actor, DetectionModule, Health, Position, Velocity};
use skirmish_core::constants::DEFAULT_WEAPON_SWITCH_DELAY;
use skirmish_core::events::CombatEvent;
use skirmish_core::inventory::WeaponInventory;
use skirmish_core::types::ActorId;
use skirmish_core::weapons::WeaponConfig;

use crate::collision::{ColliderSpec, CollisionWorld};
use crate::registry::ActorRegistry;

/// Description of an actor to spawn.
#[derive(Debug, Clone)]
pub struct ActorSpec {
    /// Team tag. Actors sharing an affiliation never target each other.
    pub affiliation: i32,
    pub position: DVec3,
    pub max_health: f64,
    pub invincible: bool,
    /// Offset other actors aim at (roughly chest height).
    pub aim_point_offset: DVec3,
    pub colliders: Vec<ColliderSpec>,
    /// Line-of-sight target acquisition, for AI combatants.
    pub detection: Option<DetectionModule>,
    /// Starting weapon templates, added in order.
    pub weapons: Vec<WeaponConfig>,
    pub switch_delay: f64,
}

impl Default for ActorSpec {
    fn default() -> Self {
        Self {
            affiliation: 0,
            position: DVec3::ZERO,
            max_health: 100.0,
            invincible: false,
            aim_point_offset: DVec3::new(0.0, 0.0, 1.0),
            // Body sphere centered on the aim point.
            colliders: vec![ColliderSpec {
                offset: DVec3::new(0.0, 0.0, 1.0),
                ..Default::default()
            }],
            detection: None,
            weapons: Vec::new(),
            switch_delay: DEFAULT_WEAPON_SWITCH_DELAY,
        }
    }
}

/// Spawn an actor: components, colliders, starting weapons, registry entry.
pub fn spawn_actor(
    world: &mut World,
    registry: &mut ActorRegistry,
    collision: &mut CollisionWorld,
    id: ActorId,
    spec: &ActorSpec,
    now: f64,
    events: &mut Vec<CombatEvent>,
) -> Entity {
    let mut health = Health::new(spec.max_health);
    health.invincible = spec.invincible;

    let mut inventory = WeaponInventory::new(spec.switch_delay);
    for template in &spec.weapons {
        if let Ok(slot) = inventory.add_weapon(template, now) {
            events.push(CombatEvent::WeaponAdded { actor: id, slot });
            if inventory.slot(slot).is_some_and(|w| w.inert) {
                events.push(CombatEvent::WeaponInert { actor: id, slot });
            }
            if inventory.active_index() == Some(slot) {
                events.push(CombatEvent::WeaponEquipped { actor: id, slot });
            }
        }
    }

    let actor = Actor {
        id,
        affiliation: spec.affiliation,
        aim_point_offset: spec.aim_point_offset,
    };

    let entity = match &spec.detection {
        Some(detection) => world.spawn((
            actor,
            Position(spec.position),
            Velocity(DVec3::ZERO),
            health,
            inventory,
            detection.clone(),
        )),
        None => world.spawn((
            actor,
            Position(spec.position),
            Velocity(DVec3::ZERO),
            health,
            inventory,
        )),
    };

    for collider in &spec.colliders {
        collision.insert(Some(id), collider);
    }
    collision.sync(&[(id, spec.position)]);
    registry.register(id, entity);
    entity
}
