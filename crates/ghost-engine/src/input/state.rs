use std::collections::HashSet;
use glam::Vec2;

/// Input events the engine understands, in surface-local pixels.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// Common key codes.
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const P: u32 = 80;
    pub const R: u32 = 82;
}

/// What a scene sees for one tick.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Latest pointer position, if the pointer has been seen.
    pub pointer: Option<Vec2>,
    /// Whether the pointer is held down.
    pub pointer_down: bool,
    /// The pointer was pressed at least once since the previous tick.
    pub pressed: bool,
    /// Where the most recent press happened.
    pub press_pos: Option<Vec2>,
    /// Keys currently held.
    pub held: HashSet<u32>,
    /// Keys pressed since the previous tick.
    pub tapped: HashSet<u32>,
}

impl InputSnapshot {
    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    pub fn was_tapped(&self, key_code: u32) -> bool {
        self.tapped.contains(&key_code)
    }
}

/// Latest-value input record.
///
/// Event handlers only overwrite the latest state (last write wins); nothing is
/// queued. Per-tick flags are cleared by [`InputState::end_tick`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    snapshot: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn apply(&mut self, event: InputEvent) {
        let s = &mut self.snapshot;
        match event {
            InputEvent::PointerMove { x, y } => s.pointer = Some(Vec2::new(x, y)),
            InputEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                s.pointer = Some(p);
                s.pointer_down = true;
                s.pressed = true;
                s.press_pos = Some(p);
            }
            InputEvent::PointerUp { x, y } => {
                s.pointer = Some(Vec2::new(x, y));
                s.pointer_down = false;
            }
            InputEvent::KeyDown { key_code } => {
                if s.held.insert(key_code) {
                    s.tapped.insert(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => {
                s.held.remove(&key_code);
            }
        }
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Reset the per-tick flags after a tick consumed them.
    pub fn end_tick(&mut self) {
        self.snapshot.pressed = false;
        self.snapshot.press_pos = None;
        self.snapshot.tapped.clear();
    }
}
