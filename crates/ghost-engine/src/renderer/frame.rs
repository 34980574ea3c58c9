use crate::components::layer::SurfaceLayer;
use crate::renderer::traits::SpriteDraw;

/// Draw lists for one presented frame, one list per surface layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    layers: [Vec<SpriteDraw>; SurfaceLayer::COUNT],
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: SurfaceLayer, draw: SpriteDraw) {
        self.layers[layer.index()].push(draw);
    }

    pub fn layer(&self, layer: SurfaceLayer) -> &[SpriteDraw] {
        &self.layers[layer.index()]
    }

    /// Empty every list, keeping allocations.
    pub fn clear(&mut self) {
        for list in self.layers.iter_mut() {
            list.clear();
        }
    }

    pub fn draw_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}
