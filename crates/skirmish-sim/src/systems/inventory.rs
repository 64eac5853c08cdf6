//! Inventory system: weapon switch transitions and player switch input.

use hecs::World;

use skirmish_core::components::Actor;
use skirmish_core::enums::SwitchState;
use skirmish_core::events::CombatEvent;
use skirmish_core::intents::FrameInput;
use skirmish_core::inventory::WeaponInventory;
use skirmish_core::types::{ActorId, SimTime};

/// Advance switch transitions for every inventory and apply the player's
/// aim/switch/select intents.
pub fn run(
    world: &mut World,
    player: Option<ActorId>,
    input: &FrameInput,
    time: SimTime,
    events: &mut Vec<CombatEvent>,
) {
    let now = time.elapsed_secs;
    for (_entity, (actor, inventory)) in world.query_mut::<(&Actor, &mut WeaponInventory)>() {
        if Some(actor.id) == player {
            // Aiming is an intent, honored only while the weapon is up.
            inventory.is_aiming = inventory.is_weapon_up() && input.aim_held;

            // Switching never interrupts aiming or an in-progress charge,
            // and only starts from a settled state.
            let charging = inventory.active_weapon().is_some_and(|w| w.is_charging);
            let settled = matches!(
                inventory.switch_state(),
                SwitchState::Up | SwitchState::Down
            );
            if !inventory.is_aiming && !charging && settled {
                if input.switch_weapon_delta != 0 {
                    let ascending = input.switch_weapon_delta > 0;
                    if let Some(slot) = inventory.switch_weapon(ascending, now) {
                        events.push(CombatEvent::WeaponEquipped { actor: actor.id, slot });
                    }
                } else if let Some(requested) = input.select_weapon_slot {
                    if let Some(slot) = inventory.switch_to_slot(requested, now) {
                        events.push(CombatEvent::WeaponEquipped { actor: actor.id, slot });
                    }
                }
            }
        }

        if let Some(slot) = inventory.update_switching(now) {
            events.push(CombatEvent::WeaponEquipped { actor: actor.id, slot });
        }
    }
}
