//! Combat engine — the core of the simulation.
//!
//! `CombatEngine` owns the hecs ECS world, the collision world, the actor
//! registry, the event buffer, and the deterministic RNG. It advances all
//! systems once per fixed tick from the polled player input and produces
//! a `TickSnapshot` per tick. Completely headless: rendering, audio, and
//! locomotion live behind the snapshot/event and kinematics interfaces.

use glam::DVec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Health, Position, Velocity};
use skirmish_core::enums::AddWeaponError;
use skirmish_core::events::CombatEvent;
use skirmish_core::intents::FrameInput;
use skirmish_core::inventory::WeaponInventory;
use skirmish_core::state::TickSnapshot;
use skirmish_core::types::{ActorId, ColliderId, SimTime};
use skirmish_core::weapons::WeaponConfig;

use crate::collision::{ColliderSpec, CollisionWorld};
use crate::registry::ActorRegistry;
use crate::systems;
use crate::world_setup::{self, ActorSpec};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The combat engine. Owns the ECS world and all simulation state.
pub struct CombatEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    collision: CollisionWorld,
    registry: ActorRegistry,
    events: Vec<CombatEvent>,
    despawn_buffer: Vec<hecs::Entity>,
    next_actor_id: u32,
    player: Option<ActorId>,
}

impl CombatEngine {
    /// Create a new combat engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            collision: CollisionWorld::new(),
            registry: ActorRegistry::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            next_actor_id: 0,
            player: None,
        }
    }

    /// Spawn an actor from a spec.
    pub fn spawn_actor(&mut self, spec: &ActorSpec) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        world_setup::spawn_actor(
            &mut self.world,
            &mut self.registry,
            &mut self.collision,
            id,
            spec,
            self.time.elapsed_secs,
            &mut self.events,
        );
        id
    }

    /// Spawn an actor and mark it as the player (fire intents and aim pose
    /// from `FrameInput` drive it).
    pub fn spawn_player(&mut self, spec: &ActorSpec) -> ActorId {
        let id = self.spawn_actor(spec);
        self.player = Some(id);
        id
    }

    /// Despawn an actor immediately, with its colliders and registry entry.
    pub fn despawn_actor(&mut self, id: ActorId) -> bool {
        let Some(entity) = self.registry.entity(id) else {
            return false;
        };
        self.collision.remove_actor(id);
        self.registry.unregister(id);
        if self.player == Some(id) {
            self.player = None;
        }
        self.world.despawn(entity).is_ok()
    }

    /// Drive an actor's transform from the external locomotion
    /// collaborator. Unknown actors are a silent no-op.
    pub fn set_actor_kinematics(&mut self, id: ActorId, position: DVec3, velocity: DVec3) -> bool {
        let Some(entity) = self.registry.entity(id) else {
            return false;
        };
        let Ok(mut pos) = self.world.get::<&mut Position>(entity) else {
            return false;
        };
        pos.0 = position;
        drop(pos);
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            vel.0 = velocity;
        }
        true
    }

    /// Register a static level collider.
    pub fn add_static_collider(&mut self, spec: &ColliderSpec) -> ColliderId {
        self.collision.insert(None, spec)
    }

    /// Add a weapon from a template to an actor's inventory.
    pub fn give_weapon(
        &mut self,
        id: ActorId,
        template: &WeaponConfig,
    ) -> Result<usize, AddWeaponError> {
        let entity = self
            .registry
            .entity(id)
            .ok_or(AddWeaponError::NoSuchActor)?;
        let mut inventory = self
            .world
            .get::<&mut WeaponInventory>(entity)
            .map_err(|_| AddWeaponError::NoSuchActor)?;
        let slot = inventory.add_weapon(template, self.time.elapsed_secs)?;
        self.events.push(CombatEvent::WeaponAdded { actor: id, slot });
        if inventory.slot(slot).is_some_and(|w| w.inert) {
            self.events.push(CombatEvent::WeaponInert { actor: id, slot });
        }
        if inventory.active_index() == Some(slot) {
            self.events
                .push(CombatEvent::WeaponEquipped { actor: id, slot });
        }
        Ok(slot)
    }

    /// Remove the weapon in an actor's inventory slot. Removing the
    /// active weapon switches to the nearest remaining one.
    pub fn remove_weapon(&mut self, id: ActorId, slot: usize) -> bool {
        let Some(entity) = self.registry.entity(id) else {
            return false;
        };
        let Ok(mut inventory) = self.world.get::<&mut WeaponInventory>(entity) else {
            return false;
        };
        let Some((_removed, equipped)) = inventory.remove_weapon(slot, self.time.elapsed_secs)
        else {
            return false;
        };
        self.events.push(CombatEvent::WeaponRemoved { actor: id, slot });
        if let Some(equipped) = equipped {
            self.events.push(CombatEvent::WeaponEquipped {
                actor: id,
                slot: equipped,
            });
        }
        true
    }

    /// External damage entry point (contact damage, hazards). Routed
    /// through the same health operations as projectile damage.
    pub fn damage_actor(&mut self, target: ActorId, amount: f64, source: Option<ActorId>) {
        crate::damage::apply_damage(
            &mut self.world,
            &self.registry,
            target,
            amount,
            source,
            &mut self.events,
        );
    }

    /// External heal entry point (pickups).
    pub fn heal_actor(&mut self, target: ActorId, amount: f64) {
        crate::damage::heal(
            &mut self.world,
            &self.registry,
            target,
            amount,
            &mut self.events,
        );
    }

    /// Force an actor's health to zero (kill volumes, scripted deaths).
    pub fn kill_actor(&mut self, target: ActorId) {
        crate::damage::kill(&mut self.world, &self.registry, target, &mut self.events);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. The input is polled once and observed by every system at
    /// the same simulation time.
    pub fn tick(&mut self, input: &FrameInput) -> TickSnapshot {
        let time = self.time;

        // Simulation phase.
        systems::inventory::run(&mut self.world, self.player, input, time, &mut self.events);
        systems::weapons::run(
            &mut self.world,
            &self.registry,
            &self.collision,
            &mut self.rng,
            self.player,
            input,
            time,
            &mut self.events,
        );
        systems::movement::run(&mut self.world, time);
        self.sync_colliders();
        systems::projectiles::run(
            &mut self.world,
            &self.registry,
            &self.collision,
            time,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        systems::detection::run(
            &mut self.world,
            &self.registry,
            &self.collision,
            time,
            &mut self.events,
        );
        systems::cleanup::run(
            &mut self.world,
            &mut self.registry,
            &mut self.collision,
            &mut self.despawn_buffer,
        );
        self.time.advance();

        // Presentation phase: derived views over the settled state.
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(&self.world, &self.registry, self.player, self.time, events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the collision world.
    pub fn collision(&self) -> &CollisionWorld {
        &self.collision
    }

    /// Whether an actor is still alive and registered.
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.registry.entity(id).is_some()
    }

    /// Current health of an actor, if it is alive.
    pub fn actor_health(&self, id: ActorId) -> Option<Health> {
        let entity = self.registry.entity(id)?;
        self.world.get::<&Health>(entity).ok().map(|h| (*h).clone())
    }

    /// Current position of an actor, if it is alive.
    pub fn actor_position(&self, id: ActorId) -> Option<DVec3> {
        let entity = self.registry.entity(id)?;
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    /// Get a read-only copy of an actor's detection state.
    #[cfg(test)]
    pub fn actor_detection(
        &self,
        id: ActorId,
    ) -> Option<skirmish_core::components::DetectionModule> {
        let entity = self.registry.entity(id)?;
        self.world
            .get::<&skirmish_core::components::DetectionModule>(entity)
            .ok()
            .map(|d| (*d).clone())
    }

    /// Get a read-only copy of an actor's inventory.
    #[cfg(test)]
    pub fn actor_inventory(&self, id: ActorId) -> Option<WeaponInventory> {
        let entity = self.registry.entity(id)?;
        self.world
            .get::<&WeaponInventory>(entity)
            .ok()
            .map(|i| (*i).clone())
    }

    /// Refresh collider world centers from actor positions.
    fn sync_colliders(&mut self) {
        let mut positions: Vec<(ActorId, DVec3)> = Vec::with_capacity(self.registry.len());
        for (_entity, (actor, position)) in self
            .world
            .query_mut::<(&skirmish_core::components::Actor, &Position)>()
        {
            positions.push((actor.id, position.0));
        }
        self.collision.sync(&positions);
    }
}
