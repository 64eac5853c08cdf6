//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a weapon responds to fire intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponShootType {
    /// One shot per fire press.
    #[default]
    Manual,
    /// Fires continuously while the fire intent is held.
    Automatic,
    /// Accumulates charge while held; fires on release.
    Charge,
}

/// Weapon switch transition state. At most one slot is Up at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchState {
    /// Active weapon raised and usable. Firing and aiming require this state.
    Up,
    /// No weapon raised.
    #[default]
    Down,
    /// Lowering the previous weapon.
    PutDownPrevious,
    /// Raising the newly selected weapon.
    PutUpNew,
}

/// Why a weapon could not be added to an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddWeaponError {
    /// A weapon from the same template is already held.
    AlreadyHeld,
    /// Every slot is occupied.
    NoFreeSlot,
    /// The receiving actor does not exist (engine-level lookup).
    NoSuchActor,
}
