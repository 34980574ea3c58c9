/// Drawing surface an entity renders to.
///
/// Surfaces are stacked back-to-front: Background first, Ui last. Each one is
/// cleared and redrawn independently, so fast-moving actors never force the
/// static room art to be repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum SurfaceLayer {
    Background = 0,
    #[default]
    Objects = 1,
    Creatures = 2,
    Effects = 3,
    Actors = 4,
    Ui = 5,
}

impl SurfaceLayer {
    /// Total number of surfaces.
    pub const COUNT: usize = 6;

    pub const ALL: [SurfaceLayer; Self::COUNT] = [
        Self::Background,
        Self::Objects,
        Self::Creatures,
        Self::Effects,
        Self::Actors,
        Self::Ui,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_objects() {
        assert_eq!(SurfaceLayer::default(), SurfaceLayer::Objects);
    }

    #[test]
    fn ordering_is_back_to_front() {
        for pair in SurfaceLayer::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn index_matches_position() {
        for (i, layer) in SurfaceLayer::ALL.into_iter().enumerate() {
            assert_eq!(layer.index(), i);
            assert_eq!(layer.as_u8() as usize, i);
        }
    }
}
