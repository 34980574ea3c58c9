use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Registry of named sprites, built from an AssetManifest.
/// Provides name-based sprite lookup for scene code.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            sprites.insert(name.clone(), SpriteComponent {
                atlas: AtlasId(desc.sheet),
                col: desc.col,
                row: desc.row,
                span: desc.span,
                ..Default::default()
            });
        }
        Self { sprites }
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Look up a sprite by name, falling back to the default cell with a warning.
    pub fn get_or_default(&self, name: &str) -> SpriteComponent {
        match self.sprites.get(name) {
            Some(sprite) => *sprite,
            None => {
                log::warn!("sprite `{}` is not in the manifest", name);
                SpriteComponent::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "sheets": [
                { "name": "bugs", "path": "BugTileset.png" }
            ],
            "sprites": {
                "bug": { "sheet": 0, "col": 3, "row": 5, "span": 2 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = SpriteRegistry::from_manifest(&manifest);

        let bug = reg.get("bug").expect("bug should exist");
        assert_eq!(bug.atlas, AtlasId(0));
        assert_eq!(bug.col, 3);
        assert_eq!(bug.row, 5);
        assert_eq!(bug.span, 2);
        assert_eq!(bug.alpha, 1.0);
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert_eq!(reg.get_or_default("nonexistent"), SpriteComponent::default());
    }
}
