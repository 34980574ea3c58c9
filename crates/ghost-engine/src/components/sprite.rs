/// Identifies which sprite sheet a sprite belongs to.
/// Index into the AssetManifest's sheet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// How an entity's motion angle shows up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Always the same cell.
    #[default]
    Fixed,
    /// Column offset by the facing bucket, row offset by the walk frame.
    Buckets(u32),
    /// Whole sprite rotated around its center by the motion angle.
    Rotate,
}

/// Sprite component: which sheet cell an entity draws and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    /// Which sheet this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the sheet grid.
    pub col: u32,
    /// Row in the sheet grid.
    pub row: u32,
    /// Number of cells this sprite spans (1 = single cell, 2 = 2x2 block).
    pub span: u32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub facing: Facing,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0,
            row: 0,
            span: 1,
            alpha: 1.0,
            facing: Facing::Fixed,
        }
    }
}

impl SpriteComponent {
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Full-surface background image: band `band` of a sheet made of stacked,
/// surface-sized pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Backdrop {
    pub atlas: AtlasId,
    pub band: u32,
}
