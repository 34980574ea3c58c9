pub mod frame;
pub mod layers;
pub mod raster;
pub mod traits;

pub use frame::Frame;
pub use layers::LayerStack;
pub use raster::RasterSurface;
pub use traits::{Surface, SpriteDraw, SOURCE_INSET};
