//! Drawing surface contract.
//!
//! The engine never talks to a canvas directly. Hosts hand it one `Surface`
//! per [`SurfaceLayer`](crate::components::layer::SurfaceLayer); the web bridge
//! implements it over `CanvasRenderingContext2d`, tests use
//! [`RasterSurface`](super::raster::RasterSurface).

use crate::components::sprite::AtlasId;
use crate::core::bounds::Rect;

/// Inset applied to every side of a source cell, in sheet pixels, so
/// neighbouring cells never bleed into a sampled sprite.
pub const SOURCE_INSET: f32 = 0.1;

/// One sprite blit: a sheet cell copied into a destination rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sheet: AtlasId,
    /// Source rectangle in sheet pixels (already inset).
    pub src: Rect,
    /// Destination rectangle in surface pixels.
    pub dest: Rect,
    /// Clockwise rotation around the destination center, in degrees.
    pub rotation_deg: Option<f32>,
    pub alpha: f32,
}

impl SpriteDraw {
    /// Draw sheet cell `(col, row)` of `cell_px` sheet pixels at `dest`.
    pub fn cell(sheet: AtlasId, col: u32, row: u32, span: u32, cell_px: f32, dest: Rect) -> Self {
        let size = cell_px * span as f32;
        let src = Rect::new(col as f32 * cell_px, row as f32 * cell_px, size, size)
            .expand(-SOURCE_INSET);
        Self {
            sheet,
            src,
            dest,
            rotation_deg: None,
            alpha: 1.0,
        }
    }

    /// Draw an arbitrary sheet region at `dest`.
    pub fn region(sheet: AtlasId, src: Rect, dest: Rect) -> Self {
        Self {
            sheet,
            src: src.expand(-SOURCE_INSET),
            dest,
            rotation_deg: None,
            alpha: 1.0,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation_deg = Some(degrees);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Area this draw may touch on the surface, covering any rotation.
    pub fn bounds(&self) -> Rect {
        match self.rotation_deg {
            Some(deg) if deg.rem_euclid(360.0) != 0.0 => {
                let half_diag = (self.dest.w * self.dest.w + self.dest.h * self.dest.h).sqrt() * 0.5;
                let c = self.dest.center();
                Rect::new(c.x - half_diag, c.y - half_diag, half_diag * 2.0, half_diag * 2.0)
            }
            _ => self.dest,
        }
    }
}

/// An independently clearable drawing surface.
pub trait Surface {
    /// Pixel dimensions `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Clear `rect` (in surface pixels) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Blit one sprite.
    fn draw_sprite(&mut self, draw: &SpriteDraw);

    /// Whole-surface rectangle.
    fn rect(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(0.0, 0.0, w as f32, h as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_source_is_inset() {
        let d = SpriteDraw::cell(AtlasId(1), 2, 1, 1, 8.0, Rect::new(0.0, 0.0, 32.0, 32.0));
        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;
        assert!(close(d.src.x, 16.1) && close(d.src.y, 8.1));
        assert!(close(d.src.w, 7.8) && close(d.src.h, 7.8));
    }

    #[test]
    fn rotated_bounds_cover_corners() {
        let d = SpriteDraw::cell(AtlasId(0), 0, 0, 1, 8.0, Rect::new(10.0, 10.0, 20.0, 20.0))
            .rotated(45.0);
        let b = d.bounds();
        assert!(b.w > 28.0 && b.w < 28.5);
        assert_eq!(b.center(), d.dest.center());
        let flat = d.rotated(360.0);
        assert_eq!(flat.bounds(), flat.dest);
    }
}
