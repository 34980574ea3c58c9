use glam::Vec2;

use crate::api::types::EntityId;
use crate::behavior::state::{EntityState, Intent, Trigger, TransitionTable};
use crate::components::animation::{Bob, WalkCycle};
use crate::components::layer::SurfaceLayer;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct carrying motion, state and draw data.
/// Role-specific data lives with the scene that owns the entity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Wave this entity belongs to; wave 0 is live from the start.
    pub wave: u8,
    /// Center position in surface pixels.
    pub pos: Vec2,
    /// Point the entity is moving toward.
    pub target: Vec2,
    /// Current speed in pixels per tick.
    pub speed: f32,
    /// Motion angle in degrees, [0, 360).
    pub angle: f32,
    pub state: EntityState,
    pub intent: Intent,
    /// Ticks this entity has been updated.
    pub animation_phase: u32,
    pub bob: Bob,
    pub walk: WalkCycle,
    /// Rendered size in surface pixels.
    pub size: Vec2,
    pub layer: SurfaceLayer,
    /// Sprite component (entities without sprites are invisible).
    pub sprite: Option<SpriteComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            wave: 0,
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            speed: 0.0,
            angle: 0.0,
            state: EntityState::Idle,
            intent: Intent::None,
            animation_phase: 0,
            bob: Bob::default(),
            walk: WalkCycle::default(),
            size: Vec2::ONE,
            layer: SurfaceLayer::Objects,
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Place the entity; its target starts on the same point.
    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self.target = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_wave(mut self, wave: u8) -> Self {
        self.wave = wave;
        self
    }

    pub fn with_layer(mut self, layer: SurfaceLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_bob(mut self, bob: Bob) -> Self {
        self.bob = bob;
        self
    }

    pub fn with_walk(mut self, walk: WalkCycle) -> Self {
        self.walk = walk;
        self
    }

    // -- State machine --

    /// Apply `trigger` through `table`. Returns true if the state changed
    /// or the rule was a self-transition.
    pub fn fire(&mut self, table: &TransitionTable, trigger: Trigger) -> bool {
        let Some(next) = table.next(self.state, trigger) else {
            return false;
        };
        if next != self.state {
            log::debug!(
                "entity {:?} `{}`: {:?} --{:?}--> {:?}",
                self.id, self.tag, self.state, trigger, next
            );
        }
        self.state = next;
        if matches!(next, EntityState::Idle | EntityState::Attached) {
            self.intent = Intent::None;
            self.speed = 0.0;
        }
        true
    }

    /// Head for `target` with `intent` if `trigger` is accepted from the current state.
    pub fn seek_to(
        &mut self,
        table: &TransitionTable,
        trigger: Trigger,
        target: Vec2,
        intent: Intent,
    ) -> bool {
        if !self.fire(table, trigger) {
            return false;
        }
        self.target = target;
        self.intent = intent;
        true
    }

    /// Pin in place until released.
    pub fn pin(&mut self, table: &TransitionTable) -> bool {
        self.fire(table, Trigger::Pinned)
    }

    pub fn release(&mut self, table: &TransitionTable) -> bool {
        self.fire(table, Trigger::Released)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, EntityState::Seeking | EntityState::Fleeing)
    }

    pub fn distance_to_target(&self) -> f32 {
        self.pos.distance(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_target_with_position() {
        let e = Entity::new(EntityId(3)).with_pos(Vec2::new(4.0, 5.0)).with_wave(2);
        assert_eq!(e.target, e.pos);
        assert_eq!(e.wave, 2);
        assert_eq!(e.state, EntityState::Idle);
    }

    #[test]
    fn seek_to_respects_table() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1));
        assert!(e.seek_to(&table, Trigger::TargetChosen, Vec2::new(9.0, 0.0), Intent::Wander));
        assert_eq!(e.state, EntityState::Seeking);
        assert_eq!(e.intent, Intent::Wander);

        e.pin(&table);
        assert_eq!(e.state, EntityState::Attached);
        assert_eq!(e.intent, Intent::None);
        assert!(!e.seek_to(&table, Trigger::AnchorNear, Vec2::ZERO, Intent::Pursue));
        assert_eq!(e.state, EntityState::Attached);
        assert!(e.release(&table));
        assert_eq!(e.state, EntityState::Idle);
    }
}
