//! Fundamental identity, time, and world-query types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Stable identifier for a spawned actor.
/// Assigned by the engine at spawn and never reused within a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ActorId(pub u32);

/// Stable identifier for a collider registered in the collision world.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ColliderId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// A single intersection returned by a world query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hit {
    /// World-space contact point.
    pub point: DVec3,
    /// Surface normal at the contact point.
    pub normal: DVec3,
    /// Distance from the query origin. 0 means the query started inside.
    pub distance: f64,
    pub collider: ColliderId,
    /// Actor the struck collider belongs to (None for level geometry).
    pub owner: Option<ActorId>,
}
