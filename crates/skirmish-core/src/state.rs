//! Tick snapshot — the complete visible state handed to presentation
//! collaborators after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::SwitchState;
use crate::events::CombatEvent;
use crate::types::{ActorId, SimTime};

/// Complete per-tick view of the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub time: SimTime,
    pub actors: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub player: Option<PlayerView>,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<CombatEvent>,
}

/// A living actor as seen by presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorView {
    pub actor: ActorId,
    pub affiliation: i32,
    pub position: DVec3,
    pub health: f64,
    pub max_health: f64,
    pub health_ratio: f64,
    pub is_critical: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: ActorId,
    pub position: DVec3,
    /// Travel direction; presentation orients the projectile along it.
    pub facing: DVec3,
    /// Charge ratio at release, for charged-projectile visuals.
    pub charge: f64,
}

/// The player's weapon HUD state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub actor: ActorId,
    pub active_slot: Option<usize>,
    pub switch_state: SwitchState,
    pub is_aiming: bool,
    pub weapons: Vec<WeaponView>,
}

/// One occupied inventory slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub slot: usize,
    pub name: String,
    pub ammo: f64,
    pub max_ammo: f64,
    pub ammo_ratio: f64,
    pub is_charging: bool,
    pub charge: f64,
    pub is_cooling: bool,
}
