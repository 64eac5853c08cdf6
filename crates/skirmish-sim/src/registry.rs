//! Actor registry — id/entity bookkeeping in registration order.

use hecs::Entity;

use skirmish_core::types::ActorId;

/// The living actors, iterated in registration order so scans stay
/// deterministic. Mutated only at actor spawn/despawn boundaries, never
/// mid-scan.
#[derive(Debug, Default)]
pub struct ActorRegistry {
    entries: Vec<(ActorId, Entity)>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ActorId, entity: Entity) {
        if !self.entries.iter().any(|(existing, _)| *existing == id) {
            self.entries.push((id, entity));
        }
    }

    pub fn unregister(&mut self, id: ActorId) {
        self.entries.retain(|(existing, _)| *existing != id);
    }

    pub fn entity(&self, id: ActorId) -> Option<Entity> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, entity)| *entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, Entity)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
