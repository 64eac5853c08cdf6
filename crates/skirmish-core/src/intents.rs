//! Player input intents, polled once per tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Edge/level input state for the player-controlled actor, sampled by the
/// input collaborator and handed to the engine each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInput {
    /// Fire intent pressed this tick.
    pub fire_down: bool,
    /// Fire intent held.
    pub fire_held: bool,
    /// Fire intent released this tick.
    pub fire_released: bool,
    /// Aim-down-sights intent held.
    pub aim_held: bool,
    /// Weapon cycle request: positive = ascending, negative = descending.
    pub switch_weapon_delta: i32,
    /// Direct slot selection (0-based). Nonexistent slots are ignored.
    pub select_weapon_slot: Option<usize>,
    /// Crouch toggle; consumed by the locomotion collaborator.
    pub crouch_toggle: bool,
    /// Camera position the player aims from.
    pub aim_origin: DVec3,
    /// Normalized screen-center aim direction.
    pub aim_direction: DVec3,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            fire_down: false,
            fire_held: false,
            fire_released: false,
            aim_held: false,
            switch_weapon_delta: 0,
            select_weapon_slot: None,
            crouch_toggle: false,
            aim_origin: DVec3::ZERO,
            aim_direction: DVec3::Y,
        }
    }
}
