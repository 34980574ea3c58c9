use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::bounds::Rect;

/// Entity storage for one scene, using a flat Vec in spawn order.
/// Designed for small entity counts (dozens, not thousands).
///
/// Entities are grouped into waves. Wave 0 is released immediately; wave `n`
/// is released once the score reaches `thresholds[n - 1]`. Unreleased entities
/// are skipped by [`Roster::live`] and [`Roster::live_mut`].
pub struct Roster {
    entities: Vec<Entity>,
    thresholds: Vec<u32>,
    released: u8,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            thresholds: Vec::new(),
            released: 0,
        }
    }

    /// Add an entity to the roster.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, preserving roster order. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities, released or not.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Active entities in released waves, in roster order.
    pub fn live(&self) -> impl Iterator<Item = &Entity> {
        let released = self.released;
        self.entities
            .iter()
            .filter(move |e| e.active && e.wave <= released)
    }

    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        let released = self.released;
        self.entities
            .iter_mut()
            .filter(move |e| e.active && e.wave <= released)
    }

    /// Whether the entity is active and its wave has been released.
    pub fn is_live(&self, id: EntityId) -> bool {
        self.get(id)
            .map(|e| e.active && e.wave <= self.released)
            .unwrap_or(false)
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Set the score thresholds that release waves 1, 2, ...
    pub fn set_wave_thresholds(&mut self, thresholds: Vec<u32>) {
        self.thresholds = thresholds;
    }

    /// Highest released wave.
    pub fn released_wave(&self) -> u8 {
        self.released
    }

    /// Release every wave whose threshold `score` has reached.
    /// Returns the waves released by this call.
    pub fn release_waves(&mut self, score: u32) -> Vec<u8> {
        let mut newly = Vec::new();
        while let Some(&needed) = self.thresholds.get(self.released as usize) {
            if score < needed {
                break;
            }
            self.released += 1;
            newly.push(self.released);
        }
        newly
    }

    /// Clamp every entity's position into `bounds`.
    pub fn clamp_all(&mut self, bounds: Rect) {
        for entity in self.entities.iter_mut() {
            entity.pos = bounds.clamp(entity.pos);
        }
    }

    /// Number of entities in the roster.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop all entities and wave state.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.thresholds.clear();
        self.released = 0;
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
