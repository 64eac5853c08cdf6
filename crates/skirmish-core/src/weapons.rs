//! Weapon configuration and firing state.
//!
//! `WeaponState` is the ammo/charge/fire-rate state machine. It has no
//! world access: shoot-type dispatch reports whether a shot was released,
//! and the sim layer samples spread directions and spawns projectiles.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::LAYER_ALL;
use crate::enums::WeaponShootType;

/// Distance-falloff curve: piecewise-linear over sorted `(t, value)` keys,
/// clamped outside the key range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalloffCurve {
    keys: Vec<(f64, f64)>,
}

impl FalloffCurve {
    pub fn new(mut keys: Vec<(f64, f64)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    /// Full damage at the center, none at the edge.
    pub fn linear() -> Self {
        Self::new(vec![(0.0, 1.0), (1.0, 0.0)])
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![(0.0, value)])
    }

    /// Sample the curve at `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let Some(&(first_t, first_v)) = self.keys.first() else {
            return 0.0;
        };
        if t <= first_t {
            return first_v;
        }
        let (last_t, last_v) = self.keys[self.keys.len() - 1];
        if t >= last_t {
            return last_v;
        }
        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= f64::EPSILON {
                    return v1;
                }
                return v0 + (v1 - v0) * ((t - t0) / span);
            }
        }
        last_v
    }
}

impl Default for FalloffCurve {
    fn default() -> Self {
        Self::linear()
    }
}

/// Area damage applied around a projectile impact point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDamageConfig {
    /// Radius of the affected sphere (meters).
    pub radius: f64,
    /// Damage ratio over normalized distance from the center.
    pub falloff: FalloffCurve,
}

impl Default for AreaDamageConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            falloff: FalloffCurve::linear(),
        }
    }
}

/// Template for projectiles spawned by a weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Launch speed (m/s).
    pub speed: f64,
    pub damage: f64,
    /// Radius of the swept-sphere hit test.
    pub radius: f64,
    /// Distance from root to tip along the travel direction.
    pub tip_offset: f64,
    /// Lifetime after which the projectile silently expires (seconds).
    pub max_lifetime_secs: f64,
    /// Downward acceleration folded into velocity each tick (0 = none).
    pub gravity: f64,
    /// Keep adding the muzzle velocity every tick instead of only at spawn.
    pub inherit_weapon_velocity: bool,
    /// Travel distance over which an off-center spawn drifts onto the aim
    /// line. 0 applies the full correction at spawn; negative disables it.
    pub trajectory_correction_distance: f64,
    /// Layers this projectile can hit.
    pub hittable_layers: u32,
    /// Area damage around the impact point instead of point damage.
    pub area: Option<AreaDamageConfig>,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            damage: 40.0,
            radius: 0.01,
            tip_offset: 0.0,
            max_lifetime_secs: 5.0,
            gravity: 0.0,
            inherit_weapon_velocity: false,
            trajectory_correction_distance: -1.0,
            hittable_layers: LAYER_ALL,
            area: None,
        }
    }
}

/// Static description of a weapon. Duplicate rejection in inventories uses
/// the template name as identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    pub shoot_type: WeaponShootType,
    /// Minimum time between two shots (seconds).
    pub delay_between_shots: f64,
    /// Cone angle (degrees) within which bullet directions are sampled.
    pub bullet_spread_angle: f64,
    pub bullets_per_shot: u32,
    /// Muzzle position relative to the owning actor.
    pub muzzle_offset: DVec3,

    // --- Ammo ---
    pub max_ammo: f64,
    /// Ammo regenerated per second once the reload delay has elapsed.
    pub ammo_reload_rate: f64,
    /// Delay after the last shot before regeneration starts (seconds).
    pub ammo_reload_delay: f64,

    // --- Charge (charge weapons only) ---
    /// Fire automatically when the charge reaches full.
    pub automatic_release_on_charged: bool,
    /// Time to reach full charge (seconds). <= 0 charges instantly.
    pub max_charge_duration: f64,
    /// Ammo consumed when charging begins.
    pub ammo_used_on_start_charge: f64,
    /// Extra ammo consumed per unit of charge gained.
    pub ammo_usage_rate_while_charging: f64,

    /// Projectile template. A weapon without one is inert.
    pub projectile: Option<ProjectileConfig>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "Blaster".to_string(),
            shoot_type: WeaponShootType::Manual,
            delay_between_shots: 0.5,
            bullet_spread_angle: 0.0,
            bullets_per_shot: 1,
            muzzle_offset: DVec3::ZERO,
            max_ammo: 8.0,
            ammo_reload_rate: 1.0,
            ammo_reload_delay: 2.0,
            automatic_release_on_charged: false,
            max_charge_duration: 2.0,
            ammo_used_on_start_charge: 1.0,
            ammo_usage_rate_while_charging: 1.0,
            projectile: Some(ProjectileConfig::default()),
        }
    }
}

/// A released shot: the charge ratio captured at the moment of firing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shot {
    pub charge: f64,
}

/// Live firing state for one held weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub config: WeaponConfig,
    pub current_ammo: f64,
    /// Time of the last shot or ammo use; fire-rate and reload-delay
    /// windows are measured from this.
    pub last_shot_time: f64,
    pub is_charging: bool,
    /// Charge ratio in `[0, 1]`. Resets to 0 only on release.
    pub current_charge: f64,
    /// Whether ammo regenerated this tick (presentation hint).
    pub is_cooling: bool,
    /// Set when required configuration is missing at add time; an inert
    /// weapon occupies its slot but never fires.
    pub inert: bool,
}

impl WeaponState {
    pub fn new(config: WeaponConfig) -> Self {
        let inert = config.projectile.is_none();
        Self {
            current_ammo: config.max_ammo,
            last_shot_time: f64::NEG_INFINITY,
            is_charging: false,
            current_charge: 0.0,
            is_cooling: false,
            inert,
            config,
        }
    }

    pub fn ammo_ratio(&self) -> f64 {
        if self.config.max_ammo == f64::INFINITY {
            1.0
        } else {
            self.current_ammo / self.config.max_ammo
        }
    }

    /// Ammo fraction one shot requires, for HUD affordances.
    pub fn ammo_needed_to_shoot(&self) -> f64 {
        let per_shot = if self.config.shoot_type == WeaponShootType::Charge {
            self.config.ammo_used_on_start_charge
        } else {
            1.0
        };
        per_shot / self.config.max_ammo
    }

    /// Regenerate ammo once the reload delay has elapsed. Never while
    /// charging; the result stays in `[0, max_ammo]`.
    pub fn update_ammo(&mut self, now: f64, dt: f64) {
        if self.last_shot_time + self.config.ammo_reload_delay < now
            && self.current_ammo < self.config.max_ammo
            && !self.is_charging
        {
            self.current_ammo =
                (self.current_ammo + self.config.ammo_reload_rate * dt).clamp(0.0, self.config.max_ammo);
            self.is_cooling = true;
        } else {
            self.is_cooling = false;
        }
    }

    /// Advance charge accumulation. Stalls (does not cancel) when the ammo
    /// for this tick's increment is not available.
    pub fn update_charge(&mut self, now: f64, dt: f64) {
        if !self.is_charging || self.current_charge >= 1.0 {
            return;
        }

        let charge_left = 1.0 - self.current_charge;
        let charge_added = if self.config.max_charge_duration <= 0.0 {
            charge_left
        } else {
            (dt / self.config.max_charge_duration).min(charge_left)
        };

        let ammo_required = charge_added * self.config.ammo_usage_rate_while_charging;
        if ammo_required <= self.current_ammo {
            self.use_ammo(ammo_required, now);
            self.current_charge = (self.current_charge + charge_added).clamp(0.0, 1.0);
        }
    }

    /// Consume ammo and stamp the last-shot time.
    pub fn use_ammo(&mut self, amount: f64, now: f64) {
        self.current_ammo = (self.current_ammo - amount).clamp(0.0, self.config.max_ammo);
        self.last_shot_time = now;
    }

    /// Dispatch one tick's fire intents. Returns the released shot, if any.
    pub fn handle_shoot_inputs(
        &mut self,
        down: bool,
        held: bool,
        released: bool,
        now: f64,
    ) -> Option<Shot> {
        if self.inert {
            return None;
        }
        match self.config.shoot_type {
            WeaponShootType::Manual => {
                if down {
                    return self.try_shoot(now);
                }
                None
            }
            WeaponShootType::Automatic => {
                if held {
                    return self.try_shoot(now);
                }
                None
            }
            WeaponShootType::Charge => {
                if held {
                    self.try_begin_charge(now);
                }
                if released || (self.config.automatic_release_on_charged && self.current_charge >= 1.0)
                {
                    return self.try_release_charge(now);
                }
                None
            }
        }
    }

    fn try_shoot(&mut self, now: f64) -> Option<Shot> {
        if self.current_ammo >= 1.0 && self.last_shot_time + self.config.delay_between_shots < now {
            self.current_ammo -= 1.0;
            self.last_shot_time = now;
            return Some(Shot {
                charge: self.current_charge,
            });
        }
        None
    }

    fn try_begin_charge(&mut self, now: f64) {
        if !self.is_charging
            && self.current_ammo >= self.config.ammo_used_on_start_charge
            && self.last_shot_time + self.config.delay_between_shots < now
        {
            self.use_ammo(self.config.ammo_used_on_start_charge, now);
            self.is_charging = true;
        }
    }

    /// Release always fires, regardless of remaining ammo.
    fn try_release_charge(&mut self, now: f64) -> Option<Shot> {
        if !self.is_charging {
            return None;
        }
        let shot = Shot {
            charge: self.current_charge,
        };
        self.current_charge = 0.0;
        self.is_charging = false;
        self.last_shot_time = now;
        Some(shot)
    }
}
