//! Room layouts, in grid tiles.

/// One wire bug: where it starts, which slot it wants, and when it shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugSpec {
    pub tile: (u32, u32),
    pub slot: usize,
    /// Ticks of wandering before it heads for its slot.
    pub patience: u32,
    pub wave: u8,
}

/// A wire room: backdrop, ghost spawn, slots and bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    /// Band of the background sheet drawn behind the room.
    pub backdrop_band: u32,
    pub ghost: (u32, u32),
    pub slots: Vec<(u32, u32)>,
    pub bugs: Vec<BugSpec>,
    /// Score needed to release waves 1, 2, ...
    pub wave_thresholds: Vec<u32>,
}

const fn bug(col: u32, row: u32, slot: usize, patience: u32, wave: u8) -> BugSpec {
    BugSpec {
        tile: (col, row),
        slot,
        patience,
        wave,
    }
}

/// Circuit board: three sockets, two bugs up front and one held back.
pub fn circuit_board() -> Layout {
    Layout {
        name: "circuit-board",
        backdrop_band: 1,
        ghost: (4, 12),
        slots: vec![(21, 21), (26, 6), (8, 19)],
        bugs: vec![
            bug(14, 0, 0, 240, 0),
            bug(30, 12, 1, 300, 0),
            bug(16, 22, 2, 360, 1),
        ],
        wave_thresholds: vec![1],
    }
}

/// Server rack: five sockets in two columns, released in three waves.
pub fn server_rack() -> Layout {
    Layout {
        name: "server-rack",
        backdrop_band: 3,
        ghost: (16, 12),
        slots: vec![(6, 4), (6, 12), (6, 20), (25, 8), (25, 16)],
        bugs: vec![
            bug(16, 0, 0, 200, 0),
            bug(16, 23, 3, 260, 0),
            bug(0, 12, 1, 320, 1),
            bug(31, 12, 4, 320, 1),
            bug(16, 8, 2, 400, 2),
        ],
        wave_thresholds: vec![2, 4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_fit_the_default_grid_and_reference_real_slots() {
        for layout in [circuit_board(), server_rack()] {
            let tiles = layout
                .slots
                .iter()
                .chain(std::iter::once(&layout.ghost))
                .copied()
                .chain(layout.bugs.iter().map(|b| b.tile));
            for (col, row) in tiles {
                assert!(col < 32 && row < 24, "{}: ({}, {})", layout.name, col, row);
            }
            for b in &layout.bugs {
                assert!(b.slot < layout.slots.len());
                assert!((b.wave as usize) <= layout.wave_thresholds.len());
            }
        }
    }
}
