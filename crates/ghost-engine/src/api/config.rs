use serde::{Deserialize, Serialize};

use crate::core::bounds::Rect;
use crate::error::EngineError;

/// Configuration for the engine, provided by the game.
///
/// Every field has a default, so a host-supplied JSON override only needs the
/// keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Target update rate in ticks per second (default: 60).
    pub tick_rate: f64,
    /// Logical grid width in units.
    pub grid_width: u32,
    /// Logical grid height in units.
    pub grid_height: u32,
    /// Art pixels per unit in the sprite sheets.
    pub art_res: u32,
    /// Give up on asset loading after this many milliseconds.
    pub asset_timeout_ms: f64,
    /// Storage key for the progress record.
    pub progress_key: String,
    /// Delay before the first-run progress write.
    pub progress_write_delay_ms: f64,
    /// Seed for the scene RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            grid_width: 32,
            grid_height: 24,
            art_res: 8,
            asset_timeout_ms: 10_000.0,
            progress_key: "ghostwire.progress".to_string(),
            progress_write_delay_ms: 2_000.0,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a partial override from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }

    /// Apply a partial JSON override on top of this config.
    pub fn with_overrides(&self, json: &str) -> Result<Self, EngineError> {
        let mut base = serde_json::to_value(self).map_err(EngineError::Config)?;
        let overrides: serde_json::Value = serde_json::from_str(json).map_err(EngineError::Config)?;
        if let (Some(base), Some(overrides)) = (base.as_object_mut(), overrides.as_object()) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base).map_err(EngineError::Config)
    }

    /// Pixels per grid unit for a host viewport, rounded down to a multiple of 4.
    ///
    /// The grid is fitted by whichever viewport axis is the tighter constraint,
    /// leaving half a unit of margin.
    pub fn unit_for_viewport(&self, viewport_w: f64, viewport_h: f64) -> u32 {
        let gw = self.grid_width as f64;
        let gh = self.grid_height as f64;
        let raw = if viewport_w / gw > viewport_h / gh {
            viewport_h / (gh + 0.5)
        } else {
            viewport_w / (gw + 0.5)
        };
        let unit = (raw / 4.0).floor() as u32 * 4;
        unit.max(4)
    }

    /// Pixel dimensions of every drawing surface at the given unit size.
    pub fn surface_size(&self, unit: u32) -> (u32, u32) {
        (self.grid_width * unit, self.grid_height * unit)
    }

    /// The canvas rectangle entities are clamped to.
    pub fn bounds(&self, unit: u32) -> Rect {
        let (w, h) = self.surface_size(unit);
        Rect::new(0.0, 0.0, w as f32, h as f32)
    }

    /// Milliseconds between ticks.
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.tick_rate
    }
}
