//! Ghostwire: scene order and assets.

use ghost_engine::{AssetManifest, EngineError, Game, GameConfig, Progress, SceneController};

use crate::levels;
use crate::scenes::{Interlude, IntroScene, WireRoom};

const MANIFEST: &str = include_str!("../assets/manifest.json");

/// Scene indices, in play order.
pub mod scene {
    pub const INTRO: usize = 0;
    pub const CIRCUIT_BOARD: usize = 1;
    pub const INTERLUDE: usize = 2;
    pub const SERVER_RACK: usize = 3;
}

pub struct WireRooms;

impl WireRooms {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WireRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for WireRooms {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn manifest(&self) -> Result<AssetManifest, EngineError> {
        AssetManifest::from_json(MANIFEST)
    }

    fn scenes(&self) -> Vec<Box<dyn SceneController>> {
        vec![
            Box::new(IntroScene::new()),
            Box::new(WireRoom::new(levels::circuit_board())),
            Box::new(Interlude::new(2, 150)),
            Box::new(WireRoom::new(levels::server_rack()).looping_to(scene::CIRCUIT_BOARD)),
        ]
    }

    /// Returning players skip the splash.
    fn first_scene(&self, progress: &Progress) -> usize {
        if progress.seen_intro {
            scene::CIRCUIT_BOARD
        } else {
            scene::INTRO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parses_and_names_every_sprite() {
        let manifest = WireRooms.manifest().unwrap();
        assert_eq!(manifest.sheets.len(), 4);
        for name in ["ghost", "bug", "bug_caged", "slot_dark", "slot_lit", "button", "pip_dark", "pip_lit"] {
            let sprite = manifest.sprites.get(name).unwrap_or_else(|| panic!("missing {}", name));
            assert!((sprite.sheet as usize) < manifest.sheets.len());
        }
        assert_eq!(manifest.sheet_paths()[0], "graphics/BlockTileset.png");
    }

    #[test]
    fn scene_order() {
        let scenes = WireRooms.scenes();
        let names: Vec<_> = scenes.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["intro", "circuit-board", "interlude", "server-rack"]);
    }
}
