//! Events emitted by the simulation for presentation and AI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::{ActorId, ColliderId};

/// Fire-and-forget notifications drained into each tick snapshot, in
/// emission order. Consumers render or play them; they never feed back
/// into the simulation's own decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A weapon released a shot.
    ShotFired {
        shooter: ActorId,
        slot: usize,
        /// Charge ratio at release (0 for non-charge weapons).
        charge: f64,
    },
    /// A projectile struck something.
    Impact {
        point: DVec3,
        normal: DVec3,
        collider: ColliderId,
    },
    /// An actor took damage (true post-clamp amount).
    Damaged {
        target: ActorId,
        amount: f64,
        source: Option<ActorId>,
    },
    /// An actor recovered health (true post-clamp amount).
    Healed { target: ActorId, amount: f64 },
    /// An actor's health reached zero. Fires exactly once per actor.
    Died { actor: ActorId },
    /// A detector gained a known target.
    TargetAcquired { detector: ActorId, target: ActorId },
    /// A detector forgot its known target.
    TargetLost { detector: ActorId },
    /// A weapon was stored in an inventory slot.
    WeaponAdded { actor: ActorId, slot: usize },
    /// A weapon was removed from an inventory slot.
    WeaponRemoved { actor: ActorId, slot: usize },
    /// A weapon became the active one.
    WeaponEquipped { actor: ActorId, slot: usize },
    /// A weapon was added with missing required configuration and will
    /// never fire. Reported once, at add time.
    WeaponInert { actor: ActorId, slot: usize },
}
