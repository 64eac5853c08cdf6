//! Weapon system: per-tick ammo/charge updates, fire-intent dispatch for
//! the player and for armed AI actors, and projectile spawning with
//! spread sampling.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Actor, DetectionModule, Position, Velocity};
use skirmish_core::events::CombatEvent;
use skirmish_core::intents::FrameInput;
use skirmish_core::inventory::WeaponInventory;
use skirmish_core::types::{ActorId, SimTime};
use skirmish_core::weapons::ProjectileConfig;

use skirmish_ai::engagement::{decide, EngagementContext};

use crate::collision::WorldQuery;
use crate::registry::ActorRegistry;
use crate::systems::projectiles::{self, ProjectileSpawn};

struct PendingShot {
    owner: ActorId,
    origin: DVec3,
    forward: DVec3,
    muzzle_velocity: DVec3,
    player_aim: Option<(DVec3, DVec3)>,
    config: ProjectileConfig,
    spread_angle: f64,
    bullets: u32,
    charge: f64,
}

/// Update every held weapon's ammo/charge, dispatch fire intents (player
/// input or AI engagement decisions), and spawn the released projectiles.
pub fn run(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    rng: &mut ChaCha8Rng,
    player: Option<ActorId>,
    input: &FrameInput,
    time: SimTime,
    events: &mut Vec<CombatEvent>,
) {
    let now = time.elapsed_secs;
    let dt = time.dt();
    let mut pending: Vec<PendingShot> = Vec::new();

    {
        let mut query = world.query::<(
            &Actor,
            &Position,
            &Velocity,
            &mut WeaponInventory,
            Option<&DetectionModule>,
        )>();
        for (_entity, (actor, position, velocity, inventory, detection)) in query.iter() {
            // Ammo regenerates and charge accrues on every held weapon,
            // active or not.
            for weapon in inventory.weapons_mut() {
                weapon.update_ammo(now, dt);
                weapon.update_charge(now, dt);
            }

            if !inventory.is_weapon_up() {
                continue;
            }
            let Some(slot) = inventory.active_index() else {
                continue;
            };
            let is_player = Some(actor.id) == player;

            let (down, held, released) = if is_player {
                (input.fire_down, input.fire_held, input.fire_released)
            } else if let Some(detection) = detection {
                let decision = decide(&EngagementContext {
                    known_target: detection.known_target,
                    is_seeing_target: detection.is_seeing_target,
                    is_target_in_attack_range: detection.is_target_in_attack_range,
                    weapon_up: inventory.is_weapon_up(),
                });
                // A held trigger; easing off releases any charge in flight.
                (decision.fire, decision.fire, !decision.fire)
            } else {
                continue;
            };

            let Some(muzzle_offset) = inventory.active_weapon().map(|w| w.config.muzzle_offset)
            else {
                continue;
            };
            let origin = position.0 + muzzle_offset;

            let forward = if is_player {
                input.aim_direction.normalize_or_zero()
            } else {
                let Some(detection) = detection else { continue };
                let Some(target) = detection.known_target else {
                    continue;
                };
                let Some(target_entity) = registry.entity(target) else {
                    continue;
                };
                let aim_point = {
                    let Ok(target_pos) = world.get::<&Position>(target_entity) else {
                        continue;
                    };
                    let Ok(target_actor) = world.get::<&Actor>(target_entity) else {
                        continue;
                    };
                    target_pos.0 + target_actor.aim_point_offset
                };
                (aim_point - origin).normalize_or_zero()
            };
            if forward == DVec3::ZERO {
                continue;
            }

            let Some(weapon) = inventory.active_weapon_mut() else {
                continue;
            };
            let Some(shot) = weapon.handle_shoot_inputs(down, held, released, now) else {
                continue;
            };
            let Some(config) = weapon.config.projectile.clone() else {
                continue;
            };

            events.push(CombatEvent::ShotFired {
                shooter: actor.id,
                slot,
                charge: shot.charge,
            });
            pending.push(PendingShot {
                owner: actor.id,
                origin,
                forward,
                muzzle_velocity: velocity.0,
                player_aim: if is_player {
                    Some((input.aim_origin, input.aim_direction.normalize_or_zero()))
                } else {
                    None
                },
                config,
                spread_angle: weapon.config.bullet_spread_angle,
                bullets: weapon.config.bullets_per_shot,
                charge: shot.charge,
            });
        }
    }

    for shot in pending {
        let ignored = queries.actor_colliders(shot.owner);
        for _ in 0..shot.bullets {
            let direction = sample_spread_direction(rng, shot.forward, shot.spread_angle);
            projectiles::spawn(
                world,
                registry,
                queries,
                &ProjectileSpawn {
                    owner: shot.owner,
                    origin: shot.origin,
                    direction,
                    muzzle_velocity: shot.muzzle_velocity,
                    player_aim: shot.player_aim,
                    config: &shot.config,
                    initial_charge: shot.charge,
                    ignored: &ignored,
                },
                time,
                events,
            );
        }
    }
}

/// Sample a shot direction: spherical interpolation between the forward
/// direction and a uniformly random unit vector, weighted by
/// `spread_angle / 180`.
fn sample_spread_direction(rng: &mut ChaCha8Rng, forward: DVec3, spread_angle: f64) -> DVec3 {
    let ratio = spread_angle / 180.0;
    let random = random_unit_vector(rng);
    slerp_direction(forward, random, ratio)
}

/// Uniformly distributed unit vector.
fn random_unit_vector(rng: &mut ChaCha8Rng) -> DVec3 {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let theta: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    DVec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Spherical interpolation between two unit vectors.
fn slerp_direction(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let dot = a.dot(b).clamp(-1.0, 1.0);
    let rel = (b - a * dot).normalize_or_zero();
    if rel == DVec3::ZERO {
        // Parallel or antiparallel: no stable rotation plane.
        return a;
    }
    let angle = dot.acos() * t;
    a * angle.cos() + rel * angle.sin()
}
