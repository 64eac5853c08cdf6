//! Engagement decision for armed AI actors.

use skirmish_core::types::ActorId;

/// Situation of one armed detector this tick.
#[derive(Debug, Clone, Copy)]
pub struct EngagementContext {
    pub known_target: Option<ActorId>,
    pub is_seeing_target: bool,
    pub is_target_in_attack_range: bool,
    /// Whether the actor's active weapon is raised and usable.
    pub weapon_up: bool,
}

/// Trigger intent for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireDecision {
    pub fire: bool,
}

/// Open fire only on a target that is currently visible AND inside attack
/// range, with the weapon raised. Memory alone (an unseen known target)
/// never pulls the trigger.
pub fn decide(ctx: &EngagementContext) -> FireDecision {
    let fire = ctx.weapon_up
        && ctx.known_target.is_some()
        && ctx.is_seeing_target
        && ctx.is_target_in_attack_range;
    FireDecision { fire }
}
