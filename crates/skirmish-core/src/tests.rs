#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::components::Health;
    use crate::enums::*;
    use crate::events::CombatEvent;
    use crate::intents::FrameInput;
    use crate::inventory::WeaponInventory;
    use crate::state::TickSnapshot;
    use crate::types::{ActorId, ColliderId, SimTime};
    use crate::weapons::{FalloffCurve, WeaponConfig, WeaponState};

    // ---- Serde round-trips ----

    #[test]
    fn test_shoot_type_serde() {
        let variants = vec![
            WeaponShootType::Manual,
            WeaponShootType::Automatic,
            WeaponShootType::Charge,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: WeaponShootType = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_switch_state_serde() {
        let variants = vec![
            SwitchState::Up,
            SwitchState::Down,
            SwitchState::PutDownPrevious,
            SwitchState::PutUpNew,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: SwitchState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_combat_event_serde() {
        let events = vec![
            CombatEvent::ShotFired {
                shooter: ActorId(1),
                slot: 0,
                charge: 0.5,
            },
            CombatEvent::Impact {
                point: DVec3::new(1.0, 2.0, 3.0),
                normal: DVec3::Z,
                collider: ColliderId(7),
            },
            CombatEvent::Damaged {
                target: ActorId(2),
                amount: 40.0,
                source: Some(ActorId(1)),
            },
            CombatEvent::Died { actor: ActorId(2) },
            CombatEvent::TargetAcquired {
                detector: ActorId(3),
                target: ActorId(1),
            },
            CombatEvent::TargetLost { detector: ActorId(3) },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: CombatEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_frame_input_serde() {
        let input = FrameInput {
            fire_down: true,
            switch_weapon_delta: -1,
            select_weapon_slot: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: FrameInput = serde_json::from_str(&json).unwrap();
        assert!(back.fire_down);
        assert_eq!(back.switch_weapon_delta, -1);
        assert_eq!(back.select_weapon_slot, Some(3));
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = TickSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TickSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    // ---- Sim time ----

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 60Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    // ---- Health ----

    #[test]
    fn test_health_clamps_and_reports_true_deltas() {
        let mut health = Health::new(100.0);
        health.current = 90.0;

        // Overheal clamps; the true delta is what was actually restored.
        assert!((health.heal(50.0) - 10.0).abs() < 1e-10);
        assert!((health.current - 100.0).abs() < 1e-10);
        assert_eq!(health.heal(5.0), 0.0);

        // Overkill clamps the same way.
        assert!((health.take_damage(40.0) - 40.0).abs() < 1e-10);
        assert!((health.take_damage(70.0) - 60.0).abs() < 1e-10);
        assert_eq!(health.current, 0.0);
        assert_eq!(health.take_damage(10.0), 0.0);
    }

    #[test]
    fn test_health_invincible_takes_nothing() {
        let mut health = Health::new(50.0);
        health.invincible = true;
        assert_eq!(health.take_damage(30.0), 0.0);
        assert!((health.current - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_health_death_latches_once() {
        let mut health = Health::new(100.0);
        health.take_damage(100.0);
        assert!(health.settle_death(), "First settle at zero fires");
        assert!(!health.settle_death(), "Second settle must not re-fire");
        health.take_damage(10.0);
        assert!(!health.settle_death());
        assert!(health.is_dead());

        // kill() on an already-dead pool changes nothing.
        health.kill();
        assert!(!health.settle_death());
    }

    #[test]
    fn test_health_critical_ratio() {
        let mut health = Health::new(100.0);
        assert!(!health.is_critical());
        health.take_damage(70.0);
        assert!(health.is_critical());
        assert!(health.can_pickup_health());
    }

    // ---- Weapon state machine ----

    #[test]
    fn test_manual_fire_gating() {
        let mut weapon = WeaponState::new(WeaponConfig::default());
        assert!(weapon.handle_shoot_inputs(true, true, false, 0.0).is_some());
        assert!((weapon.current_ammo - 7.0).abs() < 1e-10);

        // Within the fire-rate window: rejected.
        assert!(weapon.handle_shoot_inputs(true, true, false, 0.3).is_none());
        // Held without a press never fires a manual weapon.
        assert!(weapon.handle_shoot_inputs(false, true, false, 1.0).is_none());
        // After the window: fires again.
        assert!(weapon.handle_shoot_inputs(true, true, false, 0.6).is_some());
    }

    #[test]
    fn test_automatic_fires_while_held() {
        let config = WeaponConfig {
            shoot_type: WeaponShootType::Automatic,
            delay_between_shots: 0.1,
            ..Default::default()
        };
        let mut weapon = WeaponState::new(config);
        let mut fired = 0;
        for tick in 0..60 {
            let now = tick as f64 / 60.0;
            if weapon.handle_shoot_inputs(false, true, false, now).is_some() {
                fired += 1;
            }
        }
        // 1 second at 10 shots/sec, bounded by the 8-round magazine.
        assert!(fired >= 8, "Expected at least 8 shots, got {fired}");
        assert!(weapon.current_ammo >= 0.0);
    }

    #[test]
    fn test_ammo_never_leaves_bounds() {
        let mut weapon = WeaponState::new(WeaponConfig {
            shoot_type: WeaponShootType::Automatic,
            delay_between_shots: 0.0,
            ammo_reload_delay: 0.1,
            ammo_reload_rate: 100.0,
            ..Default::default()
        });
        let dt = 1.0 / 60.0;
        let mut now = 0.0;
        for tick in 0..600 {
            weapon.update_ammo(now, dt);
            // Alternate bursts and idle stretches.
            let held = (tick / 60) % 2 == 0;
            weapon.handle_shoot_inputs(false, held, false, now);
            assert!(
                weapon.current_ammo >= 0.0 && weapon.current_ammo <= weapon.config.max_ammo,
                "Ammo out of bounds: {}",
                weapon.current_ammo
            );
            now += dt;
        }
    }

    #[test]
    fn test_ammo_regen_waits_for_reload_delay() {
        let mut weapon = WeaponState::new(WeaponConfig::default());
        weapon.handle_shoot_inputs(true, false, false, 0.0);
        let after_shot = weapon.current_ammo;

        // Inside the 2s reload delay: no regen.
        weapon.update_ammo(1.0, 1.0 / 60.0);
        assert!((weapon.current_ammo - after_shot).abs() < 1e-10);
        assert!(!weapon.is_cooling);

        // Past the delay: regen at reload_rate.
        weapon.update_ammo(2.5, 1.0 / 60.0);
        assert!(weapon.current_ammo > after_shot);
        assert!(weapon.is_cooling);
    }

    #[test]
    fn test_charge_accumulates_and_releases() {
        let config = WeaponConfig {
            shoot_type: WeaponShootType::Charge,
            max_charge_duration: 1.0,
            ..Default::default()
        };
        let mut weapon = WeaponState::new(config);
        let dt = 1.0 / 60.0;
        let mut now = 0.0;

        // Begin charging: start ammo consumed immediately.
        weapon.handle_shoot_inputs(true, true, false, now);
        assert!(weapon.is_charging);
        assert!((weapon.current_ammo - 7.0).abs() < 1e-10);

        // Charge is monotonically non-decreasing while held.
        let mut last_charge = weapon.current_charge;
        for _ in 0..30 {
            now += dt;
            weapon.update_charge(now, dt);
            weapon.handle_shoot_inputs(false, true, false, now);
            assert!(weapon.current_charge >= last_charge);
            last_charge = weapon.current_charge;
        }
        assert!(weapon.current_charge > 0.4 && weapon.current_charge < 0.6);

        // Release fires and resets.
        let shot = weapon.handle_shoot_inputs(false, false, true, now);
        let shot = shot.expect("Release must fire");
        assert!((shot.charge - last_charge).abs() < 1e-10);
        assert_eq!(weapon.current_charge, 0.0);
        assert!(!weapon.is_charging);
    }

    #[test]
    fn test_charge_stalls_without_ammo_then_resumes() {
        let config = WeaponConfig {
            shoot_type: WeaponShootType::Charge,
            max_ammo: 1.0,
            max_charge_duration: 1.0,
            ammo_usage_rate_while_charging: 10.0,
            ammo_reload_delay: 0.0,
            ammo_reload_rate: 1.0,
            ..Default::default()
        };
        let mut weapon = WeaponState::new(config);
        let dt = 1.0 / 60.0;

        weapon.handle_shoot_inputs(true, true, false, 0.0);
        assert!(weapon.is_charging);
        assert_eq!(weapon.current_ammo, 0.0, "Start charge drained the magazine");

        // No ammo for the increment: the charge stalls but is not cancelled.
        weapon.update_charge(dt, dt);
        assert_eq!(weapon.current_charge, 0.0);
        assert!(weapon.is_charging);

        // Hand back some ammo; charging resumes.
        weapon.current_ammo = 1.0;
        weapon.update_charge(2.0 * dt, dt);
        assert!(weapon.current_charge > 0.0);
    }

    #[test]
    fn test_charge_auto_release_when_full() {
        let config = WeaponConfig {
            shoot_type: WeaponShootType::Charge,
            automatic_release_on_charged: true,
            max_charge_duration: 0.0,
            ..Default::default()
        };
        let mut weapon = WeaponState::new(config);
        weapon.handle_shoot_inputs(true, true, false, 0.0);
        weapon.update_charge(1.0 / 60.0, 1.0 / 60.0);
        assert!((weapon.current_charge - 1.0).abs() < 1e-10);

        // Still held, never released — auto-release fires anyway.
        let shot = weapon.handle_shoot_inputs(false, true, false, 2.0 / 60.0);
        assert!(shot.is_some());
        assert_eq!(weapon.current_charge, 0.0);
    }

    #[test]
    fn test_inert_weapon_never_fires() {
        let config = WeaponConfig {
            projectile: None,
            ..Default::default()
        };
        let mut weapon = WeaponState::new(config);
        assert!(weapon.inert);
        assert!(weapon.handle_shoot_inputs(true, true, false, 0.0).is_none());
        assert!((weapon.current_ammo - 8.0).abs() < 1e-10);
    }

    // ---- Inventory ----

    fn named(name: &str) -> WeaponConfig {
        WeaponConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_weapon_rejects_duplicates() {
        let mut inv = WeaponInventory::default();
        assert_eq!(inv.add_weapon(&named("rifle"), 0.0), Ok(0));
        assert_eq!(
            inv.add_weapon(&named("rifle"), 0.0),
            Err(AddWeaponError::AlreadyHeld)
        );
        assert_eq!(inv.add_weapon(&named("launcher"), 0.0), Ok(1));
    }

    #[test]
    fn test_add_weapon_fills_first_free_slot() {
        let mut inv = WeaponInventory::default();
        inv.add_weapon(&named("a"), 0.0).unwrap();
        inv.add_weapon(&named("b"), 0.0).unwrap();
        inv.add_weapon(&named("c"), 0.0).unwrap();
        inv.remove_weapon(1, 0.0);
        assert_eq!(inv.add_weapon(&named("d"), 0.0), Ok(1));
    }

    #[test]
    fn test_add_weapon_capacity() {
        let mut inv = WeaponInventory::default();
        for i in 0..9 {
            assert!(inv.add_weapon(&named(&format!("w{i}")), 0.0).is_ok());
        }
        assert_eq!(
            inv.add_weapon(&named("overflow"), 0.0),
            Err(AddWeaponError::NoFreeSlot)
        );
    }

    #[test]
    fn test_first_weapon_auto_activates() {
        let mut inv = WeaponInventory::default();
        inv.add_weapon(&named("rifle"), 0.0).unwrap();
        assert_eq!(inv.active_index(), Some(0));
        assert_eq!(inv.switch_state(), SwitchState::PutUpNew);
        assert!(!inv.is_weapon_up());

        // Second weapon does not steal the active slot.
        inv.add_weapon(&named("launcher"), 0.0).unwrap();
        assert_eq!(inv.active_index(), Some(0));
    }

    #[test]
    fn test_switch_cyclic_distance_selection() {
        // Occupied slots {0, 2, 4}, active = 2.
        let mut inv = WeaponInventory::new(0.0);
        inv.add_weapon(&named("a"), 0.0).unwrap();
        inv.add_weapon(&named("b"), 0.0).unwrap();
        inv.add_weapon(&named("c"), 0.0).unwrap();
        inv.add_weapon(&named("d"), 0.0).unwrap();
        inv.add_weapon(&named("e"), 0.0).unwrap();
        inv.remove_weapon(1, 0.0);
        inv.remove_weapon(3, 0.0);
        inv.update_switching(0.0);
        inv.switch_to_slot(2, 0.0);
        inv.update_switching(0.0);
        inv.update_switching(0.0);
        assert_eq!(inv.active_index(), Some(2));
        assert!(inv.is_weapon_up());

        // Ascending: slot 4 (distance 2) beats slot 0 (distance 7).
        inv.switch_weapon(true, 1.0);
        inv.update_switching(1.0);
        inv.update_switching(1.0);
        assert_eq!(inv.active_index(), Some(4));

        // Back on 2: descending picks slot 0 (distance 2) over 4 (distance 7).
        inv.switch_to_slot(2, 2.0);
        inv.update_switching(2.0);
        inv.update_switching(2.0);
        assert_eq!(inv.active_index(), Some(2));
        inv.switch_weapon(false, 3.0);
        inv.update_switching(3.0);
        inv.update_switching(3.0);
        assert_eq!(inv.active_index(), Some(0));
    }

    #[test]
    fn test_switch_transition_is_timed() {
        let mut inv = WeaponInventory::new(1.0);
        inv.add_weapon(&named("a"), 0.0).unwrap();
        assert_eq!(inv.switch_state(), SwitchState::PutUpNew);

        // Before the delay elapses the weapon stays down.
        assert!(inv.update_switching(0.5).is_none());
        assert_eq!(inv.switch_state(), SwitchState::PutUpNew);
        inv.update_switching(1.0);
        assert!(inv.is_weapon_up());

        inv.add_weapon(&named("b"), 1.0).unwrap();
        inv.switch_to_slot(1, 1.0);
        assert_eq!(inv.switch_state(), SwitchState::PutDownPrevious);
        // Active index only flips once the previous weapon is down.
        assert_eq!(inv.active_index(), Some(0));
        let equipped = inv.update_switching(2.0);
        assert_eq!(equipped, Some(1));
        assert_eq!(inv.switch_state(), SwitchState::PutUpNew);
        inv.update_switching(3.0);
        assert!(inv.is_weapon_up());
        assert_eq!(inv.active_index(), Some(1));
    }

    #[test]
    fn test_switch_to_missing_slot_is_noop() {
        let mut inv = WeaponInventory::new(0.0);
        inv.add_weapon(&named("a"), 0.0).unwrap();
        inv.update_switching(0.0);
        inv.update_switching(0.0);
        assert!(inv.is_weapon_up());

        inv.switch_to_slot(5, 1.0);
        assert_eq!(inv.active_index(), Some(0));
        assert!(inv.is_weapon_up());
        inv.switch_to_slot(99, 1.0);
        assert_eq!(inv.active_index(), Some(0));
    }

    #[test]
    fn test_remove_active_switches_to_next() {
        let mut inv = WeaponInventory::new(0.0);
        inv.add_weapon(&named("a"), 0.0).unwrap();
        inv.add_weapon(&named("b"), 0.0).unwrap();
        let (removed, equipped) = inv.remove_weapon(0, 1.0).unwrap();
        assert_eq!(removed.config.name, "a");
        assert_eq!(equipped, Some(1));
        assert_eq!(inv.active_index(), Some(1));

        // Removing the last weapon leaves the inventory down.
        let (_, equipped) = inv.remove_weapon(1, 2.0).unwrap();
        assert_eq!(equipped, None);
        assert_eq!(inv.active_index(), None);
        assert_eq!(inv.switch_state(), SwitchState::Down);
    }

    // ---- Falloff curve ----

    #[test]
    fn test_falloff_linear() {
        let curve = FalloffCurve::linear();
        assert!((curve.evaluate(0.0) - 1.0).abs() < 1e-10);
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-10);
        assert!((curve.evaluate(1.0) - 0.0).abs() < 1e-10);
        // Clamped outside the key range.
        assert!((curve.evaluate(-1.0) - 1.0).abs() < 1e-10);
        assert!((curve.evaluate(2.0) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_falloff_constant_and_custom() {
        let flat = FalloffCurve::constant(0.7);
        assert!((flat.evaluate(0.0) - 0.7).abs() < 1e-10);
        assert!((flat.evaluate(0.9) - 0.7).abs() < 1e-10);

        // Plateau then linear tail.
        let curve = FalloffCurve::new(vec![(0.0, 1.0), (0.5, 1.0), (1.0, 0.0)]);
        assert!((curve.evaluate(0.25) - 1.0).abs() < 1e-10);
        assert!((curve.evaluate(0.75) - 0.5).abs() < 1e-10);
    }
}
