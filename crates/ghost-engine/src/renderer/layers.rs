use crate::components::layer::SurfaceLayer;
use crate::core::bounds::Rect;
use crate::renderer::frame::Frame;
use crate::renderer::traits::{SpriteDraw, Surface};

/// A region clear covering more than this share of the surface becomes a full clear.
const FULL_CLEAR_SHARE: f32 = 0.5;

/// Ordered stack of surfaces, one per [`SurfaceLayer`], that only repaints
/// the layers whose draw lists changed since the last present.
pub struct LayerStack<S: Surface> {
    surfaces: Vec<S>,
    presented: [Vec<SpriteDraw>; SurfaceLayer::COUNT],
}

impl<S: Surface> LayerStack<S> {
    /// Build from exactly [`SurfaceLayer::COUNT`] surfaces, back to front.
    pub fn new(surfaces: Vec<S>) -> Self {
        assert_eq!(
            surfaces.len(),
            SurfaceLayer::COUNT,
            "LayerStack needs one surface per layer"
        );
        Self {
            surfaces,
            presented: Default::default(),
        }
    }

    pub fn surface(&self, layer: SurfaceLayer) -> &S {
        &self.surfaces[layer.index()]
    }

    /// Clear one surface and forget what was presented on it.
    pub fn clear_surface(&mut self, layer: SurfaceLayer) {
        self.surfaces[layer.index()].clear();
        self.presented[layer.index()].clear();
    }

    /// Clear every surface, e.g. on a scene change.
    pub fn clear_all(&mut self) {
        for layer in SurfaceLayer::ALL {
            self.clear_surface(layer);
        }
    }

    /// Repaint the layers whose content differs from the last present.
    /// Returns how many layers were repainted.
    pub fn present(&mut self, frame: &Frame) -> usize {
        let mut repainted = 0;
        for layer in SurfaceLayer::ALL {
            let idx = layer.index();
            let next = frame.layer(layer);
            if self.presented[idx].as_slice() == next {
                continue;
            }

            let surface = &mut self.surfaces[idx];
            let full = surface.rect();
            let dirty = self.presented[idx]
                .iter()
                .fold(Rect::default(), |acc, d| acc.union(&d.bounds().expand(1.0)))
                .intersect(&full);

            // Clear before drawing, never after.
            if !dirty.is_empty() {
                if dirty.area() > full.area() * FULL_CLEAR_SHARE {
                    surface.clear();
                } else {
                    surface.clear_rect(dirty);
                }
            }
            for draw in next {
                surface.draw_sprite(draw);
            }

            self.presented[idx].clear();
            self.presented[idx].extend_from_slice(next);
            repainted += 1;
        }
        repainted
    }

    pub fn size(&self) -> (u32, u32) {
        self.surfaces[0].size()
    }
}
