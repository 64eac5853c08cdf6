//! Collision world — the world-query capability.
//!
//! Sphere colliders attached to actors (or static level geometry), with
//! synchronous ray, swept-sphere, and overlap queries. [`CollisionWorld`]
//! is the reference implementation of [`WorldQuery`]; systems only depend
//! on the trait.

use glam::DVec3;

use skirmish_core::components::Damageable;
use skirmish_core::constants::LAYER_ACTORS;
use skirmish_core::types::{ActorId, ColliderId, Hit};

/// Description of a collider to register.
#[derive(Debug, Clone)]
pub struct ColliderSpec {
    /// Offset from the owner position, or the world position when static.
    pub offset: DVec3,
    pub radius: f64,
    pub layers: u32,
    /// Trigger volumes block nothing; projectiles ignore them unless they
    /// carry a Damageable.
    pub is_trigger: bool,
    /// Excluded from projectile hit detection entirely.
    pub ignore_hit_detection: bool,
    /// Damage multiplier for hits on this collider; None = not damageable.
    /// Only honored on actor colliders, which resolve to the owner's Health.
    pub damage_multiplier: Option<f64>,
}

impl Default for ColliderSpec {
    fn default() -> Self {
        Self {
            offset: DVec3::ZERO,
            radius: 0.5,
            layers: LAYER_ACTORS,
            is_trigger: false,
            ignore_hit_detection: false,
            damage_multiplier: Some(1.0),
        }
    }
}

/// A sphere collider registered in the collision world.
#[derive(Debug, Clone)]
pub struct Collider {
    pub id: ColliderId,
    /// Actor this collider belongs to (None = static level geometry).
    pub owner: Option<ActorId>,
    pub offset: DVec3,
    pub radius: f64,
    pub layers: u32,
    pub is_trigger: bool,
    pub ignore_hit_detection: bool,
    pub damageable: Option<Damageable>,
    world_center: DVec3,
}

impl Collider {
    /// Cached world-space center, refreshed from the owner each tick.
    pub fn world_center(&self) -> DVec3 {
        self.world_center
    }
}

/// Synchronous world queries offered to the simulation systems. All calls
/// complete within the tick that issues them.
pub trait WorldQuery {
    /// All intersections along a ray, ordered by distance.
    fn raycast_all(&self, origin: DVec3, dir: DVec3, max_dist: f64, mask: u32) -> Vec<Hit>;
    /// All intersections of a sphere swept from `from` to `to` (unordered).
    fn sweep_sphere(&self, from: DVec3, to: DVec3, radius: f64, mask: u32) -> Vec<Hit>;
    /// Colliders overlapping a sphere.
    fn overlap_sphere(&self, center: DVec3, radius: f64, mask: u32) -> Vec<ColliderId>;
    /// Metadata for a collider id returned by a query.
    fn collider(&self, id: ColliderId) -> Option<&Collider>;
    /// Every collider belonging to an actor (self-collider ignore sets).
    fn actor_colliders(&self, actor: ActorId) -> Vec<ColliderId>;
}

/// Reference collision world holding every registered collider.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider. Static colliders (no owner) use the spec offset
    /// as their world position directly.
    pub fn insert(&mut self, owner: Option<ActorId>, spec: &ColliderSpec) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        let damageable = match (owner, spec.damage_multiplier) {
            (Some(actor), Some(multiplier)) => Some(Damageable {
                damage_multiplier: multiplier,
                health_owner: actor,
            }),
            _ => None,
        };
        self.colliders.push(Collider {
            id,
            owner,
            offset: spec.offset,
            radius: spec.radius,
            layers: spec.layers,
            is_trigger: spec.is_trigger,
            ignore_hit_detection: spec.ignore_hit_detection,
            damageable,
            world_center: spec.offset,
        });
        id
    }

    /// Remove every collider belonging to an actor.
    pub fn remove_actor(&mut self, actor: ActorId) {
        self.colliders.retain(|c| c.owner != Some(actor));
    }

    /// Refresh cached world centers from actor positions.
    pub fn sync(&mut self, positions: &[(ActorId, DVec3)]) {
        for collider in &mut self.colliders {
            if let Some(owner) = collider.owner {
                if let Some((_, pos)) = positions.iter().find(|(id, _)| *id == owner) {
                    collider.world_center = *pos + collider.offset;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl WorldQuery for CollisionWorld {
    fn raycast_all(&self, origin: DVec3, dir: DVec3, max_dist: f64, mask: u32) -> Vec<Hit> {
        let mut hits = Vec::new();
        for collider in &self.colliders {
            if collider.layers & mask == 0 {
                continue;
            }
            if let Some((distance, point, normal)) =
                ray_sphere(origin, dir, max_dist, collider.world_center, collider.radius)
            {
                hits.push(Hit {
                    point,
                    normal,
                    distance,
                    collider: collider.id,
                    owner: collider.owner,
                });
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn sweep_sphere(&self, from: DVec3, to: DVec3, radius: f64, mask: u32) -> Vec<Hit> {
        let delta = to - from;
        let length = delta.length();
        let mut hits = Vec::new();
        for collider in &self.colliders {
            if collider.layers & mask == 0 {
                continue;
            }
            let inflated = radius + collider.radius;
            let result = if length <= f64::EPSILON {
                // Degenerate sweep: a pure overlap test at the start point.
                if from.distance_squared(collider.world_center) <= inflated * inflated {
                    Some((0.0, from, DVec3::ZERO))
                } else {
                    None
                }
            } else {
                ray_sphere(from, delta / length, length, collider.world_center, inflated)
            };

            if let Some((distance, swept_center, _)) = result {
                // Contact point sits on the target sphere's surface.
                let surface_normal = (swept_center - collider.world_center).normalize_or_zero();
                let point = collider.world_center + surface_normal * collider.radius;
                hits.push(Hit {
                    point,
                    normal: surface_normal,
                    distance,
                    collider: collider.id,
                    owner: collider.owner,
                });
            }
        }
        hits
    }

    fn overlap_sphere(&self, center: DVec3, radius: f64, mask: u32) -> Vec<ColliderId> {
        let mut overlapping = Vec::new();
        for collider in &self.colliders {
            if collider.layers & mask == 0 {
                continue;
            }
            let reach = radius + collider.radius;
            if center.distance_squared(collider.world_center) <= reach * reach {
                overlapping.push(collider.id);
            }
        }
        overlapping
    }

    fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    fn actor_colliders(&self, actor: ActorId) -> Vec<ColliderId> {
        self.colliders
            .iter()
            .filter(|c| c.owner == Some(actor))
            .map(|c| c.id)
            .collect()
    }
}

/// Ray vs sphere. Returns `(distance, point, normal)` for the entry point,
/// or a zero-distance hit at the origin when the ray starts inside.
/// `dir` must be normalized.
fn ray_sphere(
    origin: DVec3,
    dir: DVec3,
    max_dist: f64,
    center: DVec3,
    radius: f64,
) -> Option<(f64, DVec3, DVec3)> {
    let to_center = center - origin;
    if to_center.length_squared() <= radius * radius {
        let outward = (origin - center).normalize_or_zero();
        let normal = if outward == DVec3::ZERO { -dir } else { outward };
        return Some((0.0, origin, normal));
    }

    let along = to_center.dot(dir);
    if along < 0.0 {
        return None;
    }
    let perp_sq = to_center.length_squared() - along * along;
    let r_sq = radius * radius;
    if perp_sq > r_sq {
        return None;
    }
    let t = (along - (r_sq - perp_sq).sqrt()).max(0.0);
    if t > max_dist {
        return None;
    }
    let point = origin + dir * t;
    let normal = (point - center).normalize_or_zero();
    Some((t, point, normal))
}
