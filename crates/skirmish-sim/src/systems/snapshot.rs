//! Snapshot system — the presentation-sync phase.
//!
//! Runs after all simulation systems have settled and builds the derived
//! views (orientation follows velocity, HUD ratios) plus the drained
//! event buffer into one `TickSnapshot`.

use hecs::World;

use skirmish_core::components::{Actor, Health, Position, Projectile, Velocity};
use skirmish_core::events::CombatEvent;
use skirmish_core::inventory::WeaponInventory;
use skirmish_core::state::{ActorView, PlayerView, ProjectileView, TickSnapshot, WeaponView};
use skirmish_core::types::{ActorId, SimTime};

use crate::registry::ActorRegistry;

/// Build the complete per-tick view.
pub fn build(
    world: &World,
    registry: &ActorRegistry,
    player: Option<ActorId>,
    time: SimTime,
    events: Vec<CombatEvent>,
) -> TickSnapshot {
    let mut actors = Vec::with_capacity(registry.len());
    for (id, entity) in registry.iter() {
        let Ok(actor) = world.get::<&Actor>(entity) else {
            continue;
        };
        let Ok(position) = world.get::<&Position>(entity) else {
            continue;
        };
        let Ok(health) = world.get::<&Health>(entity) else {
            continue;
        };
        actors.push(ActorView {
            actor: id,
            affiliation: actor.affiliation,
            position: position.0,
            health: health.current,
            max_health: health.max,
            health_ratio: health.ratio(),
            is_critical: health.is_critical(),
        });
    }

    let mut projectiles = Vec::new();
    {
        let mut query = world.query::<(&Projectile, &Position, &Velocity)>();
        for (_entity, (projectile, position, velocity)) in query.iter() {
            projectiles.push(ProjectileView {
                owner: projectile.owner,
                position: position.0,
                facing: velocity.0.normalize_or_zero(),
                charge: projectile.initial_charge,
            });
        }
    }

    let player_view = player.and_then(|id| {
        let entity = registry.entity(id)?;
        let inventory = world.get::<&WeaponInventory>(entity).ok()?;
        let weapons = inventory
            .occupied()
            .map(|(slot, weapon)| WeaponView {
                slot,
                name: weapon.config.name.clone(),
                ammo: weapon.current_ammo,
                max_ammo: weapon.config.max_ammo,
                ammo_ratio: weapon.ammo_ratio(),
                is_charging: weapon.is_charging,
                charge: weapon.current_charge,
                is_cooling: weapon.is_cooling,
            })
            .collect();
        Some(PlayerView {
            actor: id,
            active_slot: inventory.active_index(),
            switch_state: inventory.switch_state(),
            is_aiming: inventory.is_aiming,
            weapons,
        })
    });

    TickSnapshot {
        time,
        actors,
        projectiles,
        player: player_view,
        events,
    }
}
