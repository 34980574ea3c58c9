use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Asset manifest describing every sprite sheet and named sprite for a game.
/// Loaded from JSON; the sheet order defines each sheet's `AtlasId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Base path prepended to every sheet path (e.g. "graphics").
    #[serde(default)]
    pub base_path: String,
    /// Sprite sheets, in load order.
    pub sheets: Vec<SheetDescriptor>,
    /// Named sprite lookup: name → sheet index + cell coordinates.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
}

/// Describes a single sprite sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Human-readable name (e.g., "ghost").
    pub name: String,
    /// Relative path to the PNG file (e.g., "GhostTileset.png").
    pub path: String,
}

/// Describes a named sprite within a sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the sheets array.
    pub sheet: u32,
    /// Column in the sheet grid.
    pub col: u32,
    /// Row in the sheet grid.
    pub row: u32,
    /// Number of cells this sprite spans (default: 1).
    #[serde(default = "default_span")]
    pub span: u32,
}

fn default_span() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Manifest)
    }

    /// Names of all sheets, in load order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Full URL-ish path for each sheet, in load order.
    pub fn sheet_paths(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|s| {
                if self.base_path.is_empty() {
                    s.path.clone()
                } else {
                    format!("{}/{}", self.base_path.trim_end_matches('/'), s.path)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "sheets": [
                { "name": "ghost", "path": "GhostTileset.png" }
            ],
            "sprites": {
                "ghost": { "sheet": 0, "col": 0, "row": 0 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sheets.len(), 1);
        assert_eq!(manifest.sprites["ghost"].span, 1);
        assert_eq!(manifest.sheet_paths(), vec!["GhostTileset.png".to_string()]);
    }

    #[test]
    fn base_path_is_joined() {
        let json = r#"{
            "base_path": "graphics/",
            "sheets": [ { "name": "bg", "path": "Background.png" } ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sheet_paths(), vec!["graphics/Background.png".to_string()]);
        assert_eq!(manifest.sheet_names(), vec!["bg".to_string()]);
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let err = AssetManifest::from_json(r#"{ "sheets": 3 }"#).unwrap_err();
        assert!(matches!(err, EngineError::Manifest(_)));
    }
}
