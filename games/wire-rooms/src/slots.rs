//! Wire slots: fixed sockets that bugs wire themselves into.

use glam::Vec2;

/// A fixed-position socket. Once activated it never becomes available again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSlot {
    pub pos: Vec2,
    pub activated: bool,
}

/// Every slot in a room, indexed by position in the layout.
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<WireSlot>,
}

impl SlotPool {
    pub fn new(positions: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            slots: positions
                .into_iter()
                .map(|pos| WireSlot { pos, activated: false })
                .collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&WireSlot> {
        self.slots.get(index)
    }

    pub fn is_available(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| !s.activated)
    }

    /// Activate a slot. Returns false if it was already active or does not exist,
    /// so each slot scores at most once.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.activated => {
                slot.activated = true;
                true
            }
            _ => false,
        }
    }

    /// Closest slot still available, if any.
    pub fn nearest_available(&self, from: Vec2) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.activated)
            .min_by(|(_, a), (_, b)| a.pos.distance_squared(from).total_cmp(&b.pos.distance_squared(from)))
            .map(|(i, _)| i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WireSlot> {
        self.slots.iter()
    }

    pub fn activated_count(&self) -> usize {
        self.slots.iter().filter(|s| s.activated).count()
    }

    /// True once every slot is wired. An empty pool is trivially complete.
    pub fn all_activated(&self) -> bool {
        self.slots.iter().all(|s| s.activated)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
