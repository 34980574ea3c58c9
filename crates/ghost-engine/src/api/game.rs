use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::SpriteRegistry;
use crate::components::sprite::Backdrop;
use crate::core::bounds::Rect;
use crate::core::rng::Rng;
use crate::core::roster::Roster;
use crate::core::score::Score;
use crate::error::EngineError;
use crate::input::state::InputSnapshot;
use crate::renderer::frame::Frame;
use crate::storage::progress::Progress;

/// The contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before anything else.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Sprite sheets and named sprites to load before the first scene.
    fn manifest(&self) -> Result<AssetManifest, EngineError>;

    /// Scene controllers, indexed by position.
    fn scenes(&self) -> Vec<Box<dyn SceneController>>;

    /// Scene to start in, given the stored progress.
    fn first_scene(&self, _progress: &Progress) -> usize {
        0
    }
}

/// One scene: builds its roster on entry, drives it every tick and decides
/// when it is done.
pub trait SceneController {
    fn name(&self) -> &'static str;

    /// Build the roster, fixed targets and backdrop.
    fn on_enter(&mut self, ctx: &mut SceneContext);

    /// Advance every live entity, in roster order.
    fn update(&mut self, ctx: &mut SceneContext, input: &InputSnapshot);

    /// Completion predicate, evaluated after each update.
    fn is_complete(&self, ctx: &SceneContext) -> bool;

    /// Scene to hand off to once complete. `None` keeps this scene running.
    fn next_scene(&self, current: usize, _ctx: &SceneContext) -> Option<usize> {
        Some(current + 1)
    }

    /// Optional scene-specific draws (buttons, HUD) on top of the roster.
    fn draw(&self, _ctx: &SceneContext, _frame: &mut Frame) {}
}

/// Mutable engine state handed to scene controllers.
pub struct SceneContext {
    pub roster: Roster,
    pub score: Score,
    pub rng: Rng,
    /// Canvas rectangle every entity is clamped to.
    pub bounds: Rect,
    /// Surface pixels per grid unit.
    pub unit: f32,
    pub config: GameConfig,
    pub sprites: SpriteRegistry,
    pub backdrop: Option<Backdrop>,
    pub progress: Progress,
    /// Events for the host, drained every frame.
    pub events: Vec<GameEvent>,
    /// Ticks since the current scene was entered.
    pub scene_ticks: u64,
    next_id: u32,
    progress_dirty: bool,
}

impl SceneContext {
    pub fn new(config: GameConfig, unit: u32, sprites: SpriteRegistry, progress: Progress) -> Self {
        Self {
            roster: Roster::new(),
            score: Score::default(),
            rng: Rng::new(config.seed),
            bounds: config.bounds(unit),
            unit: unit as f32,
            config,
            sprites,
            backdrop: None,
            progress,
            events: Vec::new(),
            scene_ticks: 0,
            next_id: 1,
            progress_dirty: false,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Pixel center of grid tile `(col, row)`.
    pub fn tile_center(&self, col: u32, row: u32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.unit,
            (row as f32 + 0.5) * self.unit,
        )
    }

    /// Size of one sheet cell in sheet pixels.
    pub fn cell_px(&self) -> f32 {
        self.config.art_res as f32
    }

    /// Add to the scene score and tell the host.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let total = self.score.add(points);
        self.emit_event(GameEvent::new(GameEvent::SCORE, total as f32, points as f32, 0.0));
        total
    }

    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Ask the host to persist `progress` after this tick.
    pub fn request_progress_save(&mut self) {
        self.progress_dirty = true;
    }

    /// The progress to persist, if a save was requested since the last call.
    pub fn take_progress_save(&mut self) -> Option<Progress> {
        if std::mem::take(&mut self.progress_dirty) {
            Some(self.progress)
        } else {
            None
        }
    }

    /// Drop everything scene-local before entering a new scene.
    pub fn reset_for_scene(&mut self) {
        self.roster.clear();
        self.score = Score::default();
        self.backdrop = None;
        self.scene_ticks = 0;
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}
