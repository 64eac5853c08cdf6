//! Target detection system: line-of-sight scans over the actor registry,
//! known-target memory, attack-range gating, and acquisition/loss events.

use glam::DVec3;
use hecs::World;

use skirmish_core::components::{Actor, DetectionModule, Position};
use skirmish_core::constants::LAYER_ALL;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{ActorId, Hit, SimTime};

use skirmish_ai::detection::{
    apply_damage_hint, closest_foreign_hit, edges, evaluate, in_attack_range,
    line_of_sight_confirmed, select_target, DetectionContext, Sighting,
};

use crate::collision::WorldQuery;
use crate::registry::ActorRegistry;

/// Run target detection for every detecting actor.
///
/// Must be called after the projectile system so this tick's damaged
/// events can force-set the victim's known target, overriding the scan.
pub fn run(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    time: SimTime,
    events: &mut Vec<CombatEvent>,
) {
    let now = time.elapsed_secs;

    // Damage notifications from this tick reveal the attacker.
    let damage_hints: Vec<(ActorId, ActorId)> = events
        .iter()
        .filter_map(|event| match event {
            CombatEvent::Damaged {
                target,
                source: Some(source),
                ..
            } => Some((*target, *source)),
            _ => None,
        })
        .collect();

    let mut query = world.query::<(&Actor, &Position, &mut DetectionModule)>();
    for (_entity, (actor, position, detection)) in query.iter() {
        let source = position.0 + detection.source_offset;
        let sqr_range = detection.detection_range * detection.detection_range;
        let self_colliders = queries.actor_colliders(actor.id);

        // Candidates: every living actor of a differing affiliation within
        // detection range, visited in registration order.
        let mut sightings: Vec<Sighting> = Vec::new();
        for (candidate_id, candidate_entity) in registry.iter() {
            if candidate_id == actor.id {
                continue;
            }
            let Ok(candidate) = world.get::<&Actor>(candidate_entity) else {
                continue;
            };
            if candidate.affiliation == actor.affiliation {
                continue;
            }
            let Ok(candidate_pos) = world.get::<&Position>(candidate_entity) else {
                continue;
            };
            let sqr_distance = candidate_pos.0.distance_squared(source);
            if sqr_distance >= sqr_range {
                continue;
            }

            let aim_point = candidate_pos.0 + candidate.aim_point_offset;
            let dir = (aim_point - source).normalize_or_zero();
            if dir == DVec3::ZERO {
                continue;
            }

            // Trigger volumes do not block sight.
            let hits: Vec<Hit> = queries
                .raycast_all(source, dir, detection.detection_range, LAYER_ALL)
                .into_iter()
                .filter(|hit| {
                    queries
                        .collider(hit.collider)
                        .map_or(false, |c| !c.is_trigger)
                })
                .collect();

            // Pure line of sight: the first obstruction must be the
            // candidate itself.
            let closest = closest_foreign_hit(&hits, &self_colliders);
            if line_of_sight_confirmed(closest, candidate_id) {
                sightings.push(Sighting {
                    target: candidate_id,
                    sqr_distance,
                });
            }
        }

        let seen = select_target(&sightings);
        let ctx = DetectionContext {
            known_target: detection.known_target,
            time_last_seen: detection.time_last_seen,
            was_seeing_target: detection.is_seeing_target,
            known_target_timeout: detection.known_target_timeout,
            now,
        };
        let mut update = evaluate(&ctx, seen);

        // Getting hit reveals the attacker, overriding this tick's scan.
        for (victim, damage_source) in &damage_hints {
            if *victim == actor.id {
                apply_damage_hint(&mut update, *damage_source, now);
            }
        }

        detection.known_target = update.known_target;
        detection.time_last_seen = update.time_last_seen;
        detection.is_seeing_target = update.is_seeing_target;

        // Attack range: straight-line distance to the known target's aim
        // point.
        let target_distance = detection.known_target.and_then(|id| {
            let entity = registry.entity(id)?;
            let target_pos = world.get::<&Position>(entity).ok()?;
            let target_actor = world.get::<&Actor>(entity).ok()?;
            Some((target_pos.0 + target_actor.aim_point_offset).distance(position.0))
        });
        detection.is_target_in_attack_range =
            in_attack_range(target_distance, detection.attack_range);

        // Acquisition/loss fire exactly on the transition tick.
        let transition = edges(detection.had_known_target, detection.known_target.is_some());
        if transition.acquired {
            if let Some(target) = detection.known_target {
                events.push(CombatEvent::TargetAcquired {
                    detector: actor.id,
                    target,
                });
            }
        }
        if transition.lost {
            events.push(CombatEvent::TargetLost {
                detector: actor.id,
            });
        }
        detection.had_known_target = detection.known_target.is_some();
    }
}
