#[cfg(test)]
mod tests {
    use glam::DVec3;

    use skirmish_core::types::{ActorId, ColliderId, Hit};

    use crate::detection::{
        apply_damage_hint, closest_foreign_hit, edges, evaluate, in_attack_range,
        line_of_sight_confirmed, select_target, DetectionContext, Sighting,
    };
    use crate::engagement::{decide, EngagementContext};

    fn hit(collider: u32, owner: Option<u32>, distance: f64) -> Hit {
        Hit {
            point: DVec3::ZERO,
            normal: DVec3::Z,
            distance,
            collider: ColliderId(collider),
            owner: owner.map(ActorId),
        }
    }

    // ---- Line of sight ----

    #[test]
    fn test_closest_foreign_hit_skips_self() {
        let hits = vec![hit(1, Some(10), 0.5), hit(2, Some(20), 2.0), hit(3, None, 5.0)];
        let own = vec![ColliderId(1)];
        let closest = closest_foreign_hit(&hits, &own).unwrap();
        assert_eq!(closest.collider, ColliderId(2));
    }

    #[test]
    fn test_closest_foreign_hit_tie_keeps_first() {
        let hits = vec![hit(4, Some(40), 3.0), hit(5, Some(50), 3.0)];
        let closest = closest_foreign_hit(&hits, &[]).unwrap();
        assert_eq!(closest.collider, ColliderId(4));
    }

    #[test]
    fn test_closest_foreign_hit_all_self() {
        let hits = vec![hit(1, Some(10), 0.5)];
        assert!(closest_foreign_hit(&hits, &[ColliderId(1)]).is_none());
    }

    #[test]
    fn test_line_of_sight_first_obstruction_wins() {
        // Wall in front of the candidate: not seen.
        let hits = vec![hit(9, None, 1.0), hit(2, Some(20), 2.0)];
        let closest = closest_foreign_hit(&hits, &[]);
        assert!(!line_of_sight_confirmed(closest, ActorId(20)));

        // Candidate itself is the first obstruction: seen.
        let hits = vec![hit(2, Some(20), 2.0), hit(9, None, 4.0)];
        let closest = closest_foreign_hit(&hits, &[]);
        assert!(line_of_sight_confirmed(closest, ActorId(20)));
    }

    // ---- Target selection ----

    #[test]
    fn test_select_target_nearest_wins() {
        let sightings = vec![
            Sighting {
                target: ActorId(1),
                sqr_distance: 9.0,
            },
            Sighting {
                target: ActorId(2),
                sqr_distance: 4.0,
            },
            Sighting {
                target: ActorId(3),
                sqr_distance: 16.0,
            },
        ];
        assert_eq!(select_target(&sightings).unwrap().target, ActorId(2));
    }

    #[test]
    fn test_select_target_tie_keeps_first() {
        let sightings = vec![
            Sighting {
                target: ActorId(1),
                sqr_distance: 4.0,
            },
            Sighting {
                target: ActorId(2),
                sqr_distance: 4.0,
            },
        ];
        assert_eq!(select_target(&sightings).unwrap().target, ActorId(1));
    }

    // ---- Target memory ----

    #[test]
    fn test_known_target_survives_until_timeout() {
        // Seen at t=1.0, lost afterwards, timeout 4s: still known while
        // now - last_seen <= 4, forgotten strictly beyond.
        let base = DetectionContext {
            known_target: Some(ActorId(7)),
            time_last_seen: 1.0,
            was_seeing_target: false,
            known_target_timeout: 4.0,
            now: 0.0,
        };

        let still_known = evaluate(
            &DetectionContext { now: 4.9, ..base },
            None,
        );
        assert_eq!(still_known.known_target, Some(ActorId(7)));

        let at_boundary = evaluate(
            &DetectionContext { now: 5.0, ..base },
            None,
        );
        assert_eq!(at_boundary.known_target, Some(ActorId(7)));

        let forgotten = evaluate(
            &DetectionContext { now: 5.01, ..base },
            None,
        );
        assert_eq!(forgotten.known_target, None);
        assert!(!forgotten.is_seeing_target);
    }

    #[test]
    fn test_visible_target_never_times_out() {
        let ctx = DetectionContext {
            known_target: Some(ActorId(7)),
            time_last_seen: 0.0,
            was_seeing_target: true,
            known_target_timeout: 4.0,
            now: 100.0,
        };
        let update = evaluate(
            &ctx,
            Some(Sighting {
                target: ActorId(7),
                sqr_distance: 1.0,
            }),
        );
        assert_eq!(update.known_target, Some(ActorId(7)));
        assert!((update.time_last_seen - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_new_sighting_replaces_known_target() {
        let ctx = DetectionContext {
            known_target: Some(ActorId(7)),
            time_last_seen: 0.0,
            was_seeing_target: false,
            known_target_timeout: 4.0,
            now: 1.0,
        };
        let update = evaluate(
            &ctx,
            Some(Sighting {
                target: ActorId(8),
                sqr_distance: 1.0,
            }),
        );
        assert_eq!(update.known_target, Some(ActorId(8)));
    }

    #[test]
    fn test_damage_hint_overrides_scan() {
        let ctx = DetectionContext {
            known_target: None,
            time_last_seen: f64::NEG_INFINITY,
            was_seeing_target: false,
            known_target_timeout: 4.0,
            now: 2.0,
        };
        // Scan saw nothing; getting shot reveals the shooter anyway.
        let mut update = evaluate(&ctx, None);
        assert_eq!(update.known_target, None);
        apply_damage_hint(&mut update, ActorId(3), 2.0);
        assert_eq!(update.known_target, Some(ActorId(3)));
        assert!((update.time_last_seen - 2.0).abs() < 1e-10);

        // And it wins over a scan result from the same tick.
        let mut update = evaluate(
            &ctx,
            Some(Sighting {
                target: ActorId(9),
                sqr_distance: 1.0,
            }),
        );
        apply_damage_hint(&mut update, ActorId(3), 2.0);
        assert_eq!(update.known_target, Some(ActorId(3)));
    }

    // ---- Attack range / edges ----

    #[test]
    fn test_in_attack_range() {
        assert!(in_attack_range(Some(9.9), 10.0));
        assert!(in_attack_range(Some(10.0), 10.0));
        assert!(!in_attack_range(Some(10.1), 10.0));
        assert!(!in_attack_range(None, 10.0));
    }

    #[test]
    fn test_edges_fire_only_on_transition() {
        let e = edges(false, true);
        assert!(e.acquired && !e.lost);
        let e = edges(true, true);
        assert!(!e.acquired && !e.lost);
        let e = edges(true, false);
        assert!(!e.acquired && e.lost);
        let e = edges(false, false);
        assert!(!e.acquired && !e.lost);
    }

    // ---- Engagement ----

    #[test]
    fn test_fire_requires_sight_range_and_raised_weapon() {
        let ready = EngagementContext {
            known_target: Some(ActorId(1)),
            is_seeing_target: true,
            is_target_in_attack_range: true,
            weapon_up: true,
        };
        assert!(decide(&ready).fire);

        assert!(
            !decide(&EngagementContext {
                is_seeing_target: false,
                ..ready
            })
            .fire,
            "Remembered but unseen target must not be fired at"
        );
        assert!(
            !decide(&EngagementContext {
                is_target_in_attack_range: false,
                ..ready
            })
            .fire
        );
        assert!(
            !decide(&EngagementContext {
                weapon_up: false,
                ..ready
            })
            .fire
        );
        assert!(
            !decide(&EngagementContext {
                known_target: None,
                is_seeing_target: false,
                is_target_in_attack_range: false,
                weapon_up: true,
            })
            .fire
        );
    }
}
