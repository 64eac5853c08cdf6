//! Weapon slot storage and the active-slot switching state machine.
//!
//! Nine fixed slots; a switch is a timed transition through
//! `PutDownPrevious`/`PutUpNew`, never instantaneous (unless the
//! configured delay is zero). Firing and aiming are only permitted while
//! the switch state is `Up`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WEAPON_SWITCH_DELAY, WEAPON_SLOT_COUNT};
use crate::enums::{AddWeaponError, SwitchState};
use crate::weapons::{WeaponConfig, WeaponState};

/// Fixed-capacity weapon storage with a timed switch transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponInventory {
    slots: Vec<Option<WeaponState>>,
    active_index: Option<usize>,
    switch_state: SwitchState,
    switch_started_at: f64,
    switch_new_index: Option<usize>,
    /// Duration of each switch transition (seconds).
    pub switch_delay: f64,
    /// Aim intent held this tick; only honored while the weapon is up.
    pub is_aiming: bool,
}

impl Default for WeaponInventory {
    fn default() -> Self {
        Self::new(DEFAULT_WEAPON_SWITCH_DELAY)
    }
}

impl WeaponInventory {
    pub fn new(switch_delay: f64) -> Self {
        Self {
            slots: vec![None; WEAPON_SLOT_COUNT],
            active_index: None,
            switch_state: SwitchState::Down,
            switch_started_at: f64::NEG_INFINITY,
            switch_new_index: None,
            switch_delay,
            is_aiming: false,
        }
    }

    pub fn switch_state(&self) -> SwitchState {
        self.switch_state
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Firing and aiming are only permitted while the active weapon is up.
    pub fn is_weapon_up(&self) -> bool {
        self.switch_state == SwitchState::Up
    }

    pub fn slot(&self, index: usize) -> Option<&WeaponState> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut WeaponState> {
        self.slots.get_mut(index).and_then(|s| s.as_mut())
    }

    pub fn active_weapon(&self) -> Option<&WeaponState> {
        self.active_index.and_then(|i| self.slot(i))
    }

    pub fn active_weapon_mut(&mut self) -> Option<&mut WeaponState> {
        let index = self.active_index?;
        self.slot_mut(index)
    }

    /// All held weapons, for per-tick ammo/charge updates.
    pub fn weapons_mut(&mut self) -> impl Iterator<Item = &mut WeaponState> {
        self.slots.iter_mut().flatten()
    }

    /// Occupied slot indices with their weapons, in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &WeaponState)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|w| (i, w)))
    }

    /// Whether a weapon from the given template is already held.
    pub fn has_weapon(&self, template_name: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|w| w.config.name == template_name)
    }

    /// Add a weapon from a template into the first free slot. Duplicates of
    /// an already-held template are rejected. Auto-activates when nothing
    /// is active. Returns the slot index on success.
    pub fn add_weapon(&mut self, template: &WeaponConfig, now: f64) -> Result<usize, AddWeaponError> {
        if self.has_weapon(&template.name) {
            return Err(AddWeaponError::AlreadyHeld);
        }
        let Some(index) = self.slots.iter().position(|s| s.is_none()) else {
            return Err(AddWeaponError::NoFreeSlot);
        };
        self.slots[index] = Some(WeaponState::new(template.clone()));
        if self.active_index.is_none() && self.switch_new_index.is_none() {
            self.switch_to_slot(index, now);
        }
        Ok(index)
    }

    /// Remove the weapon in a slot. Removing the active weapon starts an
    /// ascending switch to the nearest remaining one. Returns the removed
    /// state and the slot equipped in its place, if any.
    pub fn remove_weapon(
        &mut self,
        index: usize,
        now: f64,
    ) -> Option<(WeaponState, Option<usize>)> {
        let removed = self.slots.get_mut(index)?.take()?;
        let mut equipped = None;
        if self.active_index == Some(index) {
            equipped = self.switch_weapon(true, now);
            if equipped.is_none() && self.active_weapon().is_none() {
                // Last weapon gone: nothing to raise.
                self.active_index = None;
                self.switch_new_index = None;
                self.switch_state = SwitchState::Down;
            }
        }
        Some((removed, equipped))
    }

    /// Cycle to the occupied slot nearest to the active one in the
    /// requested direction (minimum positive cyclic distance; ties resolve
    /// to the first slot found). Returns the equipped slot when the switch
    /// completes immediately (nothing was active).
    pub fn switch_weapon(&mut self, ascending: bool, now: f64) -> Option<usize> {
        let mut closest_distance = self.slots.len();
        let mut new_index = None;
        for i in 0..self.slots.len() {
            if Some(i) != self.active_index && self.slot(i).is_some() {
                let distance = self.slot_distance(i, ascending);
                if distance < closest_distance {
                    closest_distance = distance;
                    new_index = Some(i);
                }
            }
        }
        new_index.and_then(|i| self.switch_to_slot(i, now))
    }

    /// Begin switching to the given slot. Nonexistent or already-active
    /// slots are a silent no-op. Returns the equipped slot when the switch
    /// is immediate (nothing was active to put down).
    pub fn switch_to_slot(&mut self, index: usize, now: f64) -> Option<usize> {
        if Some(index) == self.active_index || self.slot(index).is_none() {
            return None;
        }
        self.switch_new_index = Some(index);
        self.switch_started_at = now;
        if self.active_weapon().is_none() {
            // Nothing to put down: raise the new weapon directly.
            self.active_index = Some(index);
            self.switch_state = SwitchState::PutUpNew;
            return Some(index);
        }
        self.switch_state = SwitchState::PutDownPrevious;
        None
    }

    /// Advance the timed switch transition. Returns the slot that became
    /// active when the put-down phase completes.
    pub fn update_switching(&mut self, now: f64) -> Option<usize> {
        let factor = if self.switch_delay <= 0.0 {
            1.0
        } else {
            ((now - self.switch_started_at) / self.switch_delay).clamp(0.0, 1.0)
        };
        if factor < 1.0 {
            return None;
        }

        match self.switch_state {
            SwitchState::PutDownPrevious => {
                self.active_index = self.switch_new_index;
                match self.active_index {
                    Some(index) if self.slot(index).is_some() => {
                        self.switch_started_at = now;
                        self.switch_state = SwitchState::PutUpNew;
                        Some(index)
                    }
                    _ => {
                        // The new weapon disappeared mid-switch: stay down.
                        self.switch_new_index = None;
                        self.switch_state = SwitchState::Down;
                        None
                    }
                }
            }
            SwitchState::PutUpNew => {
                self.switch_new_index = None;
                self.switch_state = SwitchState::Up;
                None
            }
            _ => None,
        }
    }

    /// Cyclic distance from the active slot to `to` in the requested
    /// direction. With nothing active the search starts just below slot 0.
    fn slot_distance(&self, to: usize, ascending: bool) -> usize {
        let n = self.slots.len() as isize;
        let from = self.active_index.map_or(-1, |i| i as isize);
        let raw = if ascending {
            to as isize - from
        } else {
            from - to as isize
        };
        raw.rem_euclid(n) as usize
    }
}
