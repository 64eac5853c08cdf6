//! Projectile simulation: spawn, trajectory correction, ballistic motion,
//! swept hit detection, and impact resolution.

use glam::DVec3;
use hecs::{Entity, World};

use skirmish_core::components::{Position, Projectile, TrajectoryCorrection, Velocity};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{ActorId, ColliderId, Hit, SimTime};
use skirmish_core::weapons::{AreaDamageConfig, ProjectileConfig};

use crate::collision::WorldQuery;
use crate::damage;
use crate::registry::ActorRegistry;

/// Parameters for one projectile spawn.
pub struct ProjectileSpawn<'a> {
    pub owner: ActorId,
    /// Muzzle world position.
    pub origin: DVec3,
    /// Normalized travel direction.
    pub direction: DVec3,
    /// Muzzle world velocity at the moment of firing.
    pub muzzle_velocity: DVec3,
    /// Camera pose for player-fired projectiles; enables aim correction
    /// and the spawn-time obstruction check.
    pub player_aim: Option<(DVec3, DVec3)>,
    pub config: &'a ProjectileConfig,
    /// Charge ratio at release (0 for non-charge weapons).
    pub initial_charge: f64,
    /// The owner's colliders, which this projectile passes through.
    pub ignored: &'a [ColliderId],
}

/// One confirmed impact, ready for damage routing.
struct Strike {
    owner: ActorId,
    damage: f64,
    area: Option<AreaDamageConfig>,
    mask: u32,
    point: DVec3,
    normal: DVec3,
    collider: ColliderId,
}

/// Spawn a projectile. Player-fired projectiles get a trajectory
/// correction toward the screen-center aim line, and a camera-to-muzzle
/// obstruction check that can resolve as an immediate impact (in which
/// case nothing is spawned).
pub fn spawn(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    spawn: &ProjectileSpawn,
    time: SimTime,
    events: &mut Vec<CombatEvent>,
) -> Option<Entity> {
    let config = spawn.config;
    let mut position = spawn.origin + spawn.muzzle_velocity * time.dt();
    let velocity = spawn.direction * config.speed;

    let mut correction = TrajectoryCorrection::default();
    if let Some((camera_origin, camera_forward)) = spawn.player_aim {
        let camera_to_muzzle = spawn.origin - camera_origin;
        let vector = (-camera_to_muzzle).reject_from(camera_forward);
        let distance = config.trajectory_correction_distance;
        if distance == 0.0 {
            // Full correction on the spawn tick.
            position += vector;
            correction = TrajectoryCorrection {
                vector,
                consumed: vector,
                distance,
                active: false,
            };
        } else if distance > 0.0 {
            correction = TrajectoryCorrection {
                vector,
                consumed: DVec3::ZERO,
                distance,
                active: true,
            };
        }

        // A muzzle poking through cover must not fire through it: check
        // the camera-to-muzzle segment for an obstruction.
        let length = camera_to_muzzle.length();
        if length > f64::EPSILON {
            let dir = camera_to_muzzle / length;
            let hits = queries.raycast_all(camera_origin, dir, length, config.hittable_layers);
            for hit in &hits {
                if is_hit_valid(queries, spawn.ignored, hit) {
                    resolve_impact(
                        world,
                        registry,
                        queries,
                        &Strike {
                            owner: spawn.owner,
                            damage: config.damage,
                            area: config.area.clone(),
                            mask: config.hittable_layers,
                            point: hit.point,
                            normal: hit.normal,
                            collider: hit.collider,
                        },
                        events,
                    );
                    return None;
                }
            }
        }
    }

    let projectile = Projectile {
        owner: spawn.owner,
        damage: config.damage,
        radius: config.radius,
        tip_offset: config.tip_offset,
        max_lifetime_secs: config.max_lifetime_secs,
        spawn_tick: time.tick,
        gravity: config.gravity,
        inherit_weapon_velocity: config.inherit_weapon_velocity,
        inherited_muzzle_velocity: spawn.muzzle_velocity,
        correction,
        ignored_colliders: spawn.ignored.to_vec(),
        hittable_layers: config.hittable_layers,
        area: config.area.clone(),
        initial_charge: spawn.initial_charge,
        // The first sweep starts at the muzzle so the spawn displacement
        // cannot tunnel.
        last_root_position: spawn.origin,
    };

    Some(world.spawn((projectile, Position(position), Velocity(velocity))))
}

/// Advance all projectiles one tick: lifetime expiry, inherited muzzle
/// velocity, correction drift, gravity, then the swept hit test. Each
/// projectile resolves at most one hit and is destroyed exactly once.
pub fn run(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    time: SimTime,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut strikes: Vec<Strike> = Vec::new();
    let dt = time.dt();

    {
        let mut query = world.query::<(&mut Projectile, &mut Position, &mut Velocity)>();
        for (entity, (projectile, position, velocity)) in query.iter() {
            // Lifetime expiry: silent despawn, no event.
            let age = time.tick.saturating_sub(projectile.spawn_tick) as f64 * dt;
            if age >= projectile.max_lifetime_secs {
                despawn_buffer.push(entity);
                continue;
            }

            if projectile.inherit_weapon_velocity {
                position.0 += projectile.inherited_muzzle_velocity * dt;
            }

            // Drift toward the corrected trajectory proportionally to the
            // distance travelled, never exceeding the target vector.
            if projectile.correction.active
                && projectile.correction.consumed.length_squared()
                    < projectile.correction.vector.length_squared()
            {
                let remaining = projectile.correction.vector - projectile.correction.consumed;
                let travelled = (position.0 - projectile.last_root_position).length();
                let step = ((travelled / projectile.correction.distance)
                    * projectile.correction.vector)
                    .clamp_length_max(remaining.length());
                projectile.correction.consumed += step;
                position.0 += step;
                if projectile.correction.consumed.length_squared()
                    >= projectile.correction.vector.length_squared()
                {
                    projectile.correction.active = false;
                }
            }

            // Gravity feeds the ballistic arc on subsequent ticks.
            if projectile.gravity > 0.0 {
                velocity.0.z -= projectile.gravity * dt;
            }

            // Swept hit test from last root to current tip; closest valid
            // hit wins, first encountered on exact ties.
            let travel = velocity.0.normalize_or_zero();
            let tip = position.0 + travel * projectile.tip_offset;
            let swept = queries.sweep_sphere(
                projectile.last_root_position,
                tip,
                projectile.radius,
                projectile.hittable_layers,
            );
            let mut closest: Option<Hit> = None;
            for hit in &swept {
                if is_hit_valid(queries, &projectile.ignored_colliders, hit)
                    && closest.map_or(true, |c| hit.distance < c.distance)
                {
                    closest = Some(*hit);
                }
            }

            if let Some(mut hit) = closest {
                // Already overlapping at the sweep start: resolve at the
                // root, facing back along the travel direction.
                if hit.distance <= 0.0 {
                    hit.point = position.0;
                    hit.normal = -travel;
                }
                strikes.push(Strike {
                    owner: projectile.owner,
                    damage: projectile.damage,
                    area: projectile.area.clone(),
                    mask: projectile.hittable_layers,
                    point: hit.point,
                    normal: hit.normal,
                    collider: hit.collider,
                });
                despawn_buffer.push(entity);
                continue;
            }

            projectile.last_root_position = position.0;
        }
    }

    for strike in &strikes {
        resolve_impact(world, registry, queries, strike, events);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Hit filter: ignore-detection colliders, triggers without a Damageable,
/// and the projectile's own ignored set.
fn is_hit_valid(queries: &dyn WorldQuery, ignored: &[ColliderId], hit: &Hit) -> bool {
    let Some(collider) = queries.collider(hit.collider) else {
        return false;
    };
    if collider.ignore_hit_detection {
        return false;
    }
    if collider.is_trigger && collider.damageable.is_none() {
        return false;
    }
    !ignored.contains(&hit.collider)
}

/// Route an impact: area damage when configured, otherwise point damage to
/// the struck collider's Damageable, then the impact notification.
fn resolve_impact(
    world: &mut World,
    registry: &ActorRegistry,
    queries: &dyn WorldQuery,
    strike: &Strike,
    events: &mut Vec<CombatEvent>,
) {
    match &strike.area {
        Some(config) => {
            damage::inflict_area_damage(
                world,
                registry,
                queries,
                config,
                strike.damage,
                strike.point,
                strike.mask,
                Some(strike.owner),
                events,
            );
        }
        None => {
            if let Some(damageable) = queries.collider(strike.collider).and_then(|c| c.damageable)
            {
                damage::inflict_damage(
                    world,
                    registry,
                    &damageable,
                    strike.damage,
                    false,
                    Some(strike.owner),
                    events,
                );
            }
        }
    }

    events.push(CombatEvent::Impact {
        point: strike.point,
        normal: strike.normal,
        collider: strike.collider,
    });
}
