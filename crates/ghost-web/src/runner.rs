use ghost_engine::{
    AssetJoin, AssetManifest, Clock, DeferredWrite, Director, EngineError, Frame, Game,
    GameConfig, GameEvent, InputEvent, InputState, JoinState, KeyValueStore, LayerStack,
    Progress, SceneContext, SpriteRegistry, Surface,
};
use ghost_engine::input::state::keys;

/// Where the runner is in its lifecycle.
enum Phase {
    /// Waiting on the asset join.
    Loading,
    Running(Director),
    /// Assets never arrived; nothing else will run.
    Failed(EngineError),
}

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. Native tests drive it with `RasterSurface` and `MemoryStore`.
pub struct GameRunner<G: Game, S: Surface, K: KeyValueStore> {
    game: G,
    config: GameConfig,
    unit: u32,
    manifest: AssetManifest,
    join: AssetJoin,
    phase: Phase,
    clock: Clock,
    input: InputState,
    paused: bool,
    layers: LayerStack<S>,
    frame: Frame,
    store: K,
    progress: Progress,
    first_run: bool,
    deferred: DeferredWrite,
    /// Events produced during the last `frame` call, read by the host by pointer.
    events: Vec<GameEvent>,
}

impl<G: Game, S: Surface, K: KeyValueStore> GameRunner<G, S, K> {
    /// Build a runner over one surface per layer, back to front.
    ///
    /// Reads stored progress immediately; the game starts once every sheet in
    /// the manifest has been reported loaded.
    pub fn new(
        game: G,
        config: GameConfig,
        unit: u32,
        surfaces: Vec<S>,
        store: K,
    ) -> Result<Self, EngineError> {
        let manifest = game.manifest()?;
        let join = AssetJoin::new(manifest.sheet_names(), config.asset_timeout_ms);
        let loaded = Progress::load(&store, &config.progress_key);
        let clock = Clock::new(config.tick_rate);
        log::info!(
            "runner: {}x{} grid at {}px per unit, {} sheet(s) to load",
            config.grid_width,
            config.grid_height,
            unit,
            join.total()
        );

        Ok(Self {
            game,
            unit,
            manifest,
            join,
            phase: Phase::Loading,
            clock,
            input: InputState::new(),
            paused: false,
            layers: LayerStack::new(surfaces),
            frame: Frame::new(),
            store,
            progress: loaded.progress,
            first_run: loaded.first_run,
            deferred: DeferredWrite::default(),
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Record an input event. Only the latest state is kept.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    pub fn asset_loaded(&mut self, index: usize) {
        self.join.mark_loaded(index);
    }

    pub fn asset_failed(&mut self, index: usize) {
        self.join.mark_failed(index);
    }

    /// Drive one host display frame at `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        self.events.clear();

        if self.first_run {
            self.first_run = false;
            self.deferred.schedule(now_ms, self.config.progress_write_delay_ms);
        }
        if self.deferred.poll(now_ms) {
            self.save_progress();
        }

        match self.phase {
            Phase::Loading => self.poll_assets(now_ms),
            Phase::Running(_) => self.advance(now_ms),
            Phase::Failed(_) => {}
        }

        if let Phase::Running(director) = &self.phase {
            self.frame.clear();
            director.draw(&mut self.frame);
            self.layers.present(&self.frame);
        }
    }

    fn poll_assets(&mut self, now_ms: f64) {
        match self.join.poll(now_ms) {
            JoinState::Waiting { .. } => {}
            JoinState::Ready => {
                log::info!("runner: {} asset(s) ready", self.join.total());
                if let Err(err) = self.start(now_ms) {
                    log::error!("runner: {}", err);
                    self.phase = Phase::Failed(err);
                }
            }
            JoinState::Failed(err) => {
                log::error!("runner: {}", err);
                let index = match &err {
                    EngineError::AssetLoadFailure { name } => self
                        .manifest
                        .sheets
                        .iter()
                        .position(|s| &s.name == name)
                        .map_or(-1.0, |i| i as f32),
                    _ => -1.0,
                };
                self.events
                    .push(GameEvent::new(GameEvent::ASSET_FAILED, index, 0.0, 0.0));
                self.phase = Phase::Failed(err);
            }
        }
    }

    fn start(&mut self, now_ms: f64) -> Result<(), EngineError> {
        let sprites = SpriteRegistry::from_manifest(&self.manifest);
        let ctx = SceneContext::new(self.config.clone(), self.unit, sprites, self.progress);
        let mut director = Director::new(self.game.scenes(), ctx);
        director.enter(self.game.first_scene(&self.progress))?;
        self.events.append(&mut director.ctx.events);
        self.layers.clear_all();
        self.clock.start(now_ms);
        self.phase = Phase::Running(director);
        Ok(())
    }

    fn advance(&mut self, now_ms: f64) {
        if self.clock.tick(now_ms).is_none() {
            return;
        }
        let Phase::Running(director) = &mut self.phase else {
            return;
        };

        let input = self.input.snapshot();
        if input.was_tapped(keys::P) || input.was_tapped(keys::ESCAPE) {
            self.paused = !self.paused;
            log::info!("runner: {}", if self.paused { "paused" } else { "resumed" });
            self.events.push(GameEvent::new(
                GameEvent::PAUSED,
                if self.paused { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ));
        }
        if input.was_tapped(keys::R) {
            if let Some(current) = director.current() {
                match director.enter(current) {
                    Ok(()) => {
                        log::info!("runner: restarted `{}`", director.current_name().unwrap_or("?"));
                        self.paused = false;
                        self.layers.clear_all();
                        self.events.append(&mut director.ctx.events);
                    }
                    Err(err) => log::error!("runner: restart failed: {}", err),
                }
            }
            self.input.end_tick();
            return;
        }

        if !self.paused {
            if director.update(input).is_some() {
                self.layers.clear_all();
            }
            if let Some(progress) = director.ctx.take_progress_save() {
                self.progress = progress;
                self.store.set(&self.config.progress_key, &progress.encode());
            }
            self.events.append(&mut director.ctx.events);
        }
        self.input.end_tick();
    }

    fn save_progress(&mut self) {
        if let Phase::Running(director) = &self.phase {
            self.progress = director.ctx.progress;
        }
        self.progress.save(&mut self.store, &self.config.progress_key);
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn error(&self) -> Option<&EngineError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn director(&self) -> Option<&Director> {
        match &self.phase {
            Phase::Running(director) => Some(director),
            _ => None,
        }
    }

    pub fn layers(&self) -> &LayerStack<S> {
        &self.layers
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    // ---- Pointer accessors for host reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn surface_width(&self) -> u32 {
        self.layers.size().0
    }

    pub fn surface_height(&self) -> u32 {
        self.layers.size().1
    }
}
