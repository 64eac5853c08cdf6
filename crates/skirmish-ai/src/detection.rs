//! Target detection decision functions.
//!
//! Pure functions that compute known-target transitions for a detecting
//! actor from pre-gathered sighting data. No ECS dependency — the sim
//! layer performs the raycasts and registry scan and feeds the results in.

use skirmish_core::types::{ActorId, ColliderId, Hit};

/// Input to the detection memory update for one detector, one tick.
#[derive(Debug, Clone, Copy)]
pub struct DetectionContext {
    pub known_target: Option<ActorId>,
    pub time_last_seen: f64,
    /// Visibility result from the previous tick.
    pub was_seeing_target: bool,
    pub known_target_timeout: f64,
    pub now: f64,
}

/// A candidate that passed the line-of-sight test this tick.
#[derive(Debug, Clone, Copy)]
pub struct Sighting {
    pub target: ActorId,
    pub sqr_distance: f64,
}

/// Output of the detection memory update.
pub struct DetectionUpdate {
    pub known_target: Option<ActorId>,
    pub time_last_seen: f64,
    pub is_seeing_target: bool,
}

/// Edge-triggered transition signals between ticks.
pub struct DetectionEdges {
    pub acquired: bool,
    pub lost: bool,
}

/// Closest intersection that does not belong to the detector itself.
/// Strict `<` keeps the first of exactly-equal hits.
pub fn closest_foreign_hit<'a>(hits: &'a [Hit], self_colliders: &[ColliderId]) -> Option<&'a Hit> {
    let mut closest: Option<&Hit> = None;
    for hit in hits {
        if self_colliders.contains(&hit.collider) {
            continue;
        }
        if closest.map_or(true, |c| hit.distance < c.distance) {
            closest = Some(hit);
        }
    }
    closest
}

/// Line of sight holds only when the first obstruction along the ray IS
/// the candidate being looked at.
pub fn line_of_sight_confirmed(closest: Option<&Hit>, candidate: ActorId) -> bool {
    closest.is_some_and(|hit| hit.owner == Some(candidate))
}

/// Nearest visible candidate by squared distance (first found wins ties).
pub fn select_target(sightings: &[Sighting]) -> Option<Sighting> {
    let mut best: Option<Sighting> = None;
    for sighting in sightings {
        if best.map_or(true, |b| sighting.sqr_distance < b.sqr_distance) {
            best = Some(*sighting);
        }
    }
    best
}

/// Evaluate one tick of target memory: forget a stale unseen target, then
/// adopt this tick's nearest sighting if there is one.
pub fn evaluate(ctx: &DetectionContext, seen: Option<Sighting>) -> DetectionUpdate {
    let mut known_target = ctx.known_target;
    let mut time_last_seen = ctx.time_last_seen;

    // Only an unseen known target expires.
    if known_target.is_some()
        && !ctx.was_seeing_target
        && ctx.now - ctx.time_last_seen > ctx.known_target_timeout
    {
        known_target = None;
    }

    let is_seeing_target = seen.is_some();
    if let Some(sighting) = seen {
        known_target = Some(sighting.target);
        time_last_seen = ctx.now;
    }

    DetectionUpdate {
        known_target,
        time_last_seen,
        is_seeing_target,
    }
}

/// An external damaged signal: the victim learns the damage source,
/// overriding whatever this tick's scan concluded.
pub fn apply_damage_hint(update: &mut DetectionUpdate, source: ActorId, now: f64) {
    update.known_target = Some(source);
    update.time_last_seen = now;
}

/// Whether the known target is close enough to attack.
pub fn in_attack_range(known_target_distance: Option<f64>, attack_range: f64) -> bool {
    known_target_distance.is_some_and(|d| d <= attack_range)
}

/// Acquisition/loss transitions, fired exactly on the transition tick.
pub fn edges(had_known_target: bool, has_known_target: bool) -> DetectionEdges {
    DetectionEdges {
        acquired: !had_known_target && has_known_target,
        lost: had_known_target && !has_known_target,
    }
}
