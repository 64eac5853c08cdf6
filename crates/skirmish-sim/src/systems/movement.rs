//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Actor velocities are driven by the external locomotion collaborator;
//! projectile velocities by the projectile system.

use hecs::World;

use skirmish_core::components::{Position, Velocity};
use skirmish_core::types::SimTime;

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World, time: SimTime) {
    let dt = time.dt();
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}
