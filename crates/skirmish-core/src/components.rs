//! Simulation components for hecs entities.
//!
//! Components are data-first. The few methods here are pure state
//! operations (clamping, transition latches) with no world access;
//! everything that touches the world lives in systems.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ATTACK_RANGE, DEFAULT_CRITICAL_HEALTH_RATIO, DEFAULT_DETECTION_RANGE,
    DEFAULT_KNOWN_TARGET_TIMEOUT,
};
use crate::types::{ActorId, ColliderId};
use crate::weapons::AreaDamageConfig;

/// World-space position of an entity (meters). x = East, y = North, z = Up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Velocity of an entity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// General description of a combatant (player or AI).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Team tag. Actors sharing an affiliation never target each other.
    pub affiliation: i32,
    /// Offset from the actor position that other actors aim at.
    pub aim_point_offset: DVec3,
}

/// Health pool with a monotonic death flag.
///
/// Mutated only through its own operations; `is_dead` never reverts to
/// false once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    /// Ratio at or below which the pool reports critical.
    pub critical_ratio: f64,
    pub invincible: bool,
    is_dead: bool,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self {
            current: max,
            max,
            critical_ratio: DEFAULT_CRITICAL_HEALTH_RATIO,
            invincible: false,
            is_dead: false,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.current / self.max
    }

    pub fn is_critical(&self) -> bool {
        self.ratio() <= self.critical_ratio
    }

    /// Whether a health pickup would have any effect.
    pub fn can_pickup_health(&self) -> bool {
        self.current < self.max
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Restore health, clamped to `[0, max]`. Returns the true amount healed.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);
        self.current - before
    }

    /// Apply damage, clamped to `[0, max]`. Returns the true amount taken
    /// (0 while invincible).
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        if self.invincible {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        before - self.current
    }

    /// Force health to zero.
    pub fn kill(&mut self) {
        self.current = 0.0;
    }

    /// Latch the death flag. Returns true exactly once, on the call that
    /// first observes the pool at zero.
    pub fn settle_death(&mut self) -> bool {
        if !self.is_dead && self.current <= 0.0 {
            self.is_dead = true;
            return true;
        }
        false
    }
}

/// Per-collider damage descriptor: a non-owning reference to the actor
/// whose Health absorbs hits on this collider. Several colliders on one
/// body may all point at the same owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Damageable {
    /// Multiplier applied to non-area damage (headshot colliders etc).
    pub damage_multiplier: f64,
    pub health_owner: ActorId,
}

/// Line-of-sight target acquisition state for a detecting actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionModule {
    /// Maximum distance at which targets can be seen.
    pub detection_range: f64,
    /// Maximum distance at which the known target can be attacked.
    pub attack_range: f64,
    /// Seconds an unseen known target is remembered before being forgotten.
    pub known_target_timeout: f64,
    /// Offset from the actor position of the sensor raycast origin.
    pub source_offset: DVec3,

    pub known_target: Option<ActorId>,
    pub time_last_seen: f64,
    pub is_seeing_target: bool,
    pub is_target_in_attack_range: bool,
    /// Known-target status at the end of the previous tick, for
    /// edge-triggered acquisition/loss events.
    pub had_known_target: bool,
}

impl DetectionModule {
    pub fn new(detection_range: f64, attack_range: f64, known_target_timeout: f64) -> Self {
        Self {
            detection_range,
            attack_range,
            known_target_timeout,
            source_offset: DVec3::ZERO,
            known_target: None,
            time_last_seen: f64::NEG_INFINITY,
            is_seeing_target: false,
            is_target_in_attack_range: false,
            had_known_target: false,
        }
    }
}

impl Default for DetectionModule {
    fn default() -> Self {
        Self::new(
            DEFAULT_DETECTION_RANGE,
            DEFAULT_ATTACK_RANGE,
            DEFAULT_KNOWN_TARGET_TIMEOUT,
        )
    }
}

/// Trajectory correction state for player-fired projectiles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrajectoryCorrection {
    /// Full correction to apply over the configured travel distance.
    pub vector: DVec3,
    /// Portion already applied.
    pub consumed: DVec3,
    /// Travel distance over which the full vector is applied.
    pub distance: f64,
    pub active: bool,
}

/// A projectile in flight. Owned exclusively by the projectile system;
/// destroyed on hit, lifetime expiry, or out-of-bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ActorId,
    pub damage: f64,
    /// Radius of the swept-sphere hit test.
    pub radius: f64,
    /// Distance from root to tip along the travel direction.
    pub tip_offset: f64,
    pub max_lifetime_secs: f64,
    pub spawn_tick: u64,
    /// Downward acceleration folded into velocity each tick (0 = none).
    pub gravity: f64,
    /// Keep adding the muzzle velocity every tick instead of only at spawn.
    pub inherit_weapon_velocity: bool,
    /// Muzzle world velocity at the moment of firing.
    pub inherited_muzzle_velocity: DVec3,
    pub correction: TrajectoryCorrection,
    /// Colliders this projectile passes through (the owner's, recorded at spawn).
    pub ignored_colliders: Vec<ColliderId>,
    /// Layers this projectile can hit.
    pub hittable_layers: u32,
    /// Area damage applied around the impact point instead of point damage.
    pub area: Option<AreaDamageConfig>,
    /// Charge ratio at release (0 for non-charge weapons).
    pub initial_charge: f64,
    /// Root position at the end of the previous tick; the sweep starts here.
    pub last_root_position: DVec3,
}
