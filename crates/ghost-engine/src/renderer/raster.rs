//! Headless surface: a plain pixel buffer for tests and native hosts.

use crate::core::bounds::Rect;
use crate::renderer::traits::{SpriteDraw, Surface};

/// CPU surface with one `u32` per pixel; 0 is transparent.
///
/// Sprites are rasterized as solid rectangles over their bounds, tagged with
/// the sheet and source cell, which is enough to observe what ended up where.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    /// Full clears performed.
    pub clears: u32,
    /// Region clears performed.
    pub rect_clears: u32,
    /// Sprites drawn.
    pub draws: u32,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            clears: 0,
            rect_clears: 0,
            draws: 0,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    /// Value written for a draw: sheet and source cell origin.
    pub fn ink(draw: &SpriteDraw) -> u32 {
        let sx = draw.src.x.max(0.0) as u32 & 0xfff;
        let sy = draw.src.y.max(0.0) as u32 & 0xfff;
        ((draw.sheet.0 + 1) << 24) | (sx << 12) | sy
    }

    /// Pixel index range `[x0, x1) x [y0, y1)` whose centers fall in `rect`.
    fn span(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let clip = rect.intersect(&Rect::new(0.0, 0.0, self.width as f32, self.height as f32));
        if clip.is_empty() {
            return (0, 0, 0, 0);
        }
        let x0 = (clip.x - 0.5).ceil().max(0.0) as u32;
        let y0 = (clip.y - 0.5).ceil().max(0.0) as u32;
        let x1 = ((clip.x + clip.w - 0.5).floor() + 1.0).clamp(0.0, self.width as f32) as u32;
        let y1 = ((clip.y + clip.h - 0.5).floor() + 1.0).clamp(0.0, self.height as f32) as u32;
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    fn fill(&mut self, rect: Rect, value: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = value;
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
        self.clears += 1;
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.fill(rect, 0);
        self.rect_clears += 1;
    }

    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        self.draws += 1;
        if draw.alpha <= 0.0 {
            return;
        }
        self.fill(draw.bounds(), Self::ink(draw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::AtlasId;

    fn sprite(x: f32, y: f32) -> SpriteDraw {
        SpriteDraw::cell(AtlasId(2), 1, 0, 1, 8.0, Rect::new(x, y, 4.0, 4.0))
    }

    #[test]
    fn draw_fills_destination() {
        let mut s = RasterSurface::new(16, 16);
        let d = sprite(2.0, 2.0);
        s.draw_sprite(&d);
        assert_eq!(s.pixel(2, 2), RasterSurface::ink(&d));
        assert_eq!(s.pixel(5, 5), RasterSurface::ink(&d));
        assert_eq!(s.pixel(6, 6), 0);
        assert_eq!(s.pixel(1, 2), 0);
    }

    #[test]
    fn clear_twice_then_draw_matches_clear_once_then_draw() {
        let mut once = RasterSurface::new(16, 16);
        let mut twice = RasterSurface::new(16, 16);
        for s in [&mut once, &mut twice] {
            s.draw_sprite(&sprite(0.0, 0.0));
            s.draw_sprite(&sprite(8.0, 8.0));
        }
        once.clear();
        twice.clear();
        twice.clear();
        once.draw_sprite(&sprite(4.0, 4.0));
        twice.draw_sprite(&sprite(4.0, 4.0));
        assert_eq!(once.pixels(), twice.pixels());

        let region = Rect::new(0.0, 0.0, 10.0, 10.0);
        once.clear_rect(region);
        twice.clear_rect(region);
        twice.clear_rect(region);
        once.draw_sprite(&sprite(1.0, 1.0));
        twice.draw_sprite(&sprite(1.0, 1.0));
        assert_eq!(once.pixels(), twice.pixels());
    }

    #[test]
    fn off_surface_draws_are_clipped() {
        let mut s = RasterSurface::new(8, 8);
        s.draw_sprite(&sprite(-2.0, 6.0));
        assert_eq!(s.pixel(0, 7), RasterSurface::ink(&sprite(0.0, 0.0)));
        s.clear_rect(Rect::new(50.0, 50.0, 4.0, 4.0));
        assert!(!s.is_blank());
    }
}
