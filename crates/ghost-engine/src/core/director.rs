use crate::api::game::{SceneContext, SceneController};
use crate::api::types::GameEvent;
use crate::components::layer::SurfaceLayer;
use crate::error::EngineError;
use crate::input::state::InputSnapshot;
use crate::renderer::frame::Frame;
use crate::renderer::traits::SpriteDraw;
use crate::core::bounds::Rect;
use crate::systems::render::draw_entities;

/// A scene hand-off reported by [`Director::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneChange {
    pub from: usize,
    pub to: usize,
}

/// Owns the registered scenes and the shared context, runs the active scene
/// and moves on when it completes.
pub struct Director {
    scenes: Vec<Box<dyn SceneController>>,
    current: Option<usize>,
    /// Latched completion of the current scene instance.
    complete: bool,
    pub ctx: SceneContext,
}

impl Director {
    pub fn new(scenes: Vec<Box<dyn SceneController>>, ctx: SceneContext) -> Self {
        Self {
            scenes,
            current: None,
            complete: false,
            ctx,
        }
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.map(|i| self.scenes[i].name())
    }

    /// Whether the current scene has completed. Stays true until a new scene is entered.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Enter scene `index`, replacing the current one.
    ///
    /// An unregistered index is a programming error: it asserts in debug builds
    /// and returns [`EngineError::InvalidSceneIndex`] otherwise.
    pub fn enter(&mut self, index: usize) -> Result<(), EngineError> {
        let count = self.scenes.len();
        debug_assert!(index < count, "no scene registered at index {} ({} registered)", index, count);
        if index >= count {
            return Err(EngineError::InvalidSceneIndex { index, count });
        }

        self.ctx.reset_for_scene();
        self.scenes[index].on_enter(&mut self.ctx);
        self.ctx.roster.release_waves(self.ctx.score.get());
        self.ctx.roster.clamp_all(self.ctx.bounds);
        self.current = Some(index);
        self.complete = false;
        self.ctx
            .emit_event(GameEvent::new(GameEvent::SCENE_ENTERED, index as f32, 0.0, 0.0));
        log::info!(
            "entered scene {} `{}` with {} entities",
            index,
            self.scenes[index].name(),
            self.ctx.roster.len()
        );
        Ok(())
    }

    /// Run one tick of the active scene. Returns the hand-off if the scene
    /// completed and a next scene was entered.
    pub fn update(&mut self, input: &InputSnapshot) -> Option<SceneChange> {
        let index = self.current?;

        if !self.complete {
            let scene = &mut self.scenes[index];
            scene.update(&mut self.ctx, input);
            self.ctx.scene_ticks += 1;

            for wave in self.ctx.roster.release_waves(self.ctx.score.get()) {
                log::debug!("`{}`: released wave {}", scene.name(), wave);
            }
            self.ctx.roster.clamp_all(self.ctx.bounds);

            if scene.is_complete(&self.ctx) {
                log::info!("scene `{}` complete with score {}", scene.name(), self.ctx.score.get());
                self.complete = true;
            }
        }

        if !self.complete {
            return None;
        }
        let next = self.scenes[index].next_scene(index, &self.ctx)?;
        match self.enter(next) {
            Ok(()) => Some(SceneChange { from: index, to: next }),
            Err(err) => {
                log::error!("{}", err);
                None
            }
        }
    }

    /// Backdrop, live entities, then the scene's own overlay.
    pub fn draw(&self, frame: &mut Frame) {
        let ctx = &self.ctx;
        if let Some(backdrop) = ctx.backdrop {
            let art_w = (ctx.config.grid_width * ctx.config.art_res) as f32;
            let art_h = (ctx.config.grid_height * ctx.config.art_res) as f32;
            let src = Rect::new(0.0, art_h * backdrop.band as f32, art_w, art_h);
            frame.push(
                SurfaceLayer::Background,
                SpriteDraw::region(backdrop.atlas, src, ctx.bounds),
            );
        }
        draw_entities(ctx.roster.live(), ctx.cell_px(), frame);
        if let Some(index) = self.current {
            self.scenes[index].draw(ctx, frame);
        }
    }
}
