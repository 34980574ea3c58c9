use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in a scene roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new score, `b` = points added.
    pub const SCORE: f32 = 1.0;
    /// `a` = index of the scene just entered.
    pub const SCENE_ENTERED: f32 = 2.0;
    /// `a` = index of the asset that failed (or -1.0 on timeout).
    pub const ASSET_FAILED: f32 = 3.0;
    /// `a` = 1.0 when paused, 0.0 when resumed.
    pub const PAUSED: f32 = 4.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let ev = GameEvent::new(GameEvent::SCORE, 3.0, 1.0, 0.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&ev));
        assert_eq!(floats, &[1.0, 3.0, 1.0, 0.0]);
    }
}
