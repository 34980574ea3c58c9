//! The three kinds of scene: intro splash, wire room and interlude.

use std::collections::HashMap;

use glam::Vec2;
use ghost_engine::behavior::{step, BehaviorParams, Sensors};
use ghost_engine::input::state::keys;
use ghost_engine::{
    Backdrop, Bob, Entity, EntityId, EntityState, Facing, Frame, InputSnapshot, Intent, Rect,
    SceneContext, SceneController, SpriteComponent, SpriteDraw, SurfaceLayer, TransitionTable,
    Trigger, WalkCycle,
};

use crate::levels::Layout;
use crate::roles::{
    bug_params, bug_table, ghost_params, ghost_table, sense_range, BugMind, BugPhase, Role,
    CAGE_TICKS, FLASH_TICKS, REST_TICKS,
};
use crate::slots::SlotPool;

/// Sheet holding the stacked full-screen backgrounds.
const BACKGROUND_SHEET: u32 = 1;

fn backdrop(band: u32) -> Backdrop {
    Backdrop {
        atlas: ghost_engine::AtlasId(BACKGROUND_SHEET),
        band,
    }
}

/// Put the ghost on the actor layer at `tile`, bobbing.
fn spawn_ghost(ctx: &mut SceneContext, tile: (u32, u32)) -> EntityId {
    let id = ctx.next_id();
    let sprite = ctx.sprites.get_or_default("ghost").with_facing(Facing::Buckets(4));
    let entity = Entity::new(id)
        .with_tag("ghost")
        .with_pos(ctx.tile_center(tile.0, tile.1))
        .with_size(Vec2::splat(ctx.unit * sprite.span as f32))
        .with_layer(SurfaceLayer::Actors)
        .with_sprite(sprite)
        .with_bob(Bob::new(0.08, ctx.unit * 0.15))
        .with_walk(WalkCycle::new(10, 2));
    ctx.roster.spawn(entity);
    id
}

/// One ghost tick: chase `anchor` if there is one, otherwise bob.
fn step_ghost(entity: &mut Entity, table: &TransitionTable, params: &BehaviorParams, anchor: Option<Vec2>, bounds: Rect) {
    let sensors = Sensors {
        anchor,
        ..Sensors::default()
    };
    if step(entity, table, params, &sensors, bounds).is_some() {
        entity.fire(table, Trigger::EffectApplied);
    }
}

// ---------------------------------------------------------------------------
// Intro
// ---------------------------------------------------------------------------

/// Splash screen. Done when the start button is clicked or Enter/Space is hit;
/// passing it is the milestone that gets persisted.
pub struct IntroScene {
    button: Rect,
    done: bool,
    table: TransitionTable,
}

impl IntroScene {
    pub fn new() -> Self {
        Self {
            button: Rect::default(),
            done: false,
            table: ghost_table(),
        }
    }

    /// Start button, in surface pixels.
    pub fn button(&self) -> Rect {
        self.button
    }
}

impl Default for IntroScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController for IntroScene {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn on_enter(&mut self, ctx: &mut SceneContext) {
        self.done = false;
        ctx.backdrop = Some(backdrop(0));
        let center = ctx.bounds.center();
        self.button = Rect::centered(
            Vec2::new(center.x, ctx.bounds.h * 0.75),
            Vec2::splat(ctx.unit * 4.0),
        );
        let mid = (ctx.config.grid_width / 2, ctx.config.grid_height / 3);
        spawn_ghost(ctx, mid);
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &InputSnapshot) {
        let bounds = ctx.bounds;
        let params = ghost_params(ctx.unit);
        if let Some(ghost) = ctx.roster.find_by_tag_mut("ghost") {
            step_ghost(ghost, &self.table, &params, None, bounds);
        }

        if self.done {
            return;
        }
        let clicked = input.pressed && input.press_pos.is_some_and(|p| self.button.contains(p));
        if clicked || input.was_tapped(keys::ENTER) || input.was_tapped(keys::SPACE) {
            self.done = true;
            ctx.progress.seen_intro = true;
            ctx.request_progress_save();
            log::info!("intro passed");
        }
    }

    fn is_complete(&self, _ctx: &SceneContext) -> bool {
        self.done
    }

    fn draw(&self, ctx: &SceneContext, frame: &mut Frame) {
        let sprite = ctx.sprites.get_or_default("button");
        frame.push(
            SurfaceLayer::Ui,
            SpriteDraw::cell(sprite.atlas, sprite.col, sprite.row, sprite.span, ctx.cell_px(), self.button),
        );
    }
}

// ---------------------------------------------------------------------------
// Wire room
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct RoomArt {
    bug: SpriteComponent,
    bug_caged: SpriteComponent,
    slot_dark: SpriteComponent,
    slot_lit: SpriteComponent,
    pip_dark: SpriteComponent,
    pip_lit: SpriteComponent,
}

/// Fading spark over a slot that was just wired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub pos: Vec2,
    pub ticks_left: u32,
}

/// A room of wire slots. The ghost chases the pointer and spooks the bugs;
/// the bugs wander, flee, and eventually wire themselves in. Clicking a bug
/// cages it for a while. Done once every slot is wired.
pub struct WireRoom {
    layout: Layout,
    slots: SlotPool,
    roles: HashMap<EntityId, Role>,
    ghost_table: TransitionTable,
    bug_table: TransitionTable,
    art: RoomArt,
    flashes: Vec<Flash>,
    loop_to: Option<usize>,
}

impl WireRoom {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            slots: SlotPool::default(),
            roles: HashMap::new(),
            ghost_table: ghost_table(),
            bug_table: bug_table(),
            art: RoomArt::default(),
            flashes: Vec::new(),
            loop_to: None,
        }
    }

    /// Hand off to scene `index` when done, instead of the next one.
    pub fn looping_to(mut self, index: usize) -> Self {
        self.loop_to = Some(index);
        self
    }

    pub fn slots(&self) -> &SlotPool {
        &self.slots
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn role(&self, id: EntityId) -> Option<&Role> {
        self.roles.get(&id)
    }

    /// Roster IDs of the bugs, in layout order.
    pub fn bug_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .roles
            .iter()
            .filter(|(_, r)| matches!(r, Role::WireBug(_)))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

impl SceneController for WireRoom {
    fn name(&self) -> &'static str {
        self.layout.name
    }

    fn on_enter(&mut self, ctx: &mut SceneContext) {
        self.roles.clear();
        self.flashes.clear();
        let sprites = &ctx.sprites;
        self.art = RoomArt {
            bug: sprites.get_or_default("bug").with_facing(Facing::Rotate),
            bug_caged: sprites.get_or_default("bug_caged"),
            slot_dark: sprites.get_or_default("slot_dark"),
            slot_lit: sprites.get_or_default("slot_lit"),
            pip_dark: sprites.get_or_default("pip_dark"),
            pip_lit: sprites.get_or_default("pip_lit"),
        };
        ctx.backdrop = Some(backdrop(self.layout.backdrop_band));
        self.slots = SlotPool::new(self.layout.slots.iter().map(|&(c, r)| ctx.tile_center(c, r)));

        let ghost = spawn_ghost(ctx, self.layout.ghost);
        self.roles.insert(ghost, Role::Ghost);

        for spec in &self.layout.bugs {
            let id = ctx.next_id();
            let entity = Entity::new(id)
                .with_tag("bug")
                .with_pos(ctx.tile_center(spec.tile.0, spec.tile.1))
                .with_size(Vec2::splat(ctx.unit))
                .with_wave(spec.wave)
                .with_layer(SurfaceLayer::Creatures)
                .with_sprite(self.art.bug)
                .with_walk(WalkCycle::new(6, 2));
            ctx.roster.spawn(entity);
            self.roles
                .insert(id, Role::WireBug(BugMind::new(spec.slot, spec.patience)));
        }

        for (index, slot) in self.slots.iter().enumerate() {
            let id = ctx.next_id();
            let span = self.art.slot_dark.span as f32;
            ctx.roster.spawn(
                Entity::new(id)
                    .with_tag("slot")
                    .with_pos(slot.pos)
                    .with_size(Vec2::splat(ctx.unit * span))
                    .with_layer(SurfaceLayer::Objects)
                    .with_sprite(self.art.slot_dark),
            );
            self.roles.insert(id, Role::Slot { index });
        }

        ctx.roster
            .set_wave_thresholds(self.layout.wave_thresholds.clone());
        log::info!(
            "room `{}`: {} bugs, {} slots",
            self.layout.name,
            self.layout.bugs.len(),
            self.slots.len()
        );
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &InputSnapshot) {
        let unit = ctx.unit;
        let bounds = ctx.bounds;
        let ghost_params = ghost_params(unit);
        let bug_params = bug_params(unit);
        let click = if input.pressed { input.press_pos } else { None };

        for flash in &mut self.flashes {
            flash.ticks_left -= 1;
        }
        self.flashes.retain(|f| f.ticks_left > 0);

        let mut threat = ctx.roster.find_by_tag("ghost").map(|g| g.pos);
        let mut wired = 0;
        let ids: Vec<EntityId> = ctx.roster.live().map(|e| e.id).collect();

        for id in ids {
            let (Some(role), Some(entity)) = (self.roles.get_mut(&id), ctx.roster.get_mut(id)) else {
                continue;
            };
            match role {
                Role::Ghost => {
                    step_ghost(entity, &self.ghost_table, &ghost_params, input.pointer, bounds);
                    threat = Some(entity.pos);
                }
                Role::WireBug(mind) => {
                    let turn = BugTurn {
                        table: &self.bug_table,
                        params: &bug_params,
                        art: &self.art,
                        unit,
                        bounds,
                        threat,
                        click,
                    };
                    if let Some(pos) = turn.run(entity, mind, &mut self.slots, &mut ctx.rng) {
                        self.flashes.push(Flash {
                            pos,
                            ticks_left: FLASH_TICKS,
                        });
                        wired += 1;
                    }
                }
                Role::Slot { index } => {
                    let lit = self.slots.get(*index).is_some_and(|s| s.activated);
                    entity.sprite = Some(if lit { self.art.slot_lit } else { self.art.slot_dark });
                }
            }
        }

        if wired > 0 {
            let total = ctx.add_score(wired);
            log::debug!("room `{}`: {} slot(s) wired, score {}", self.layout.name, wired, total);
        }
    }

    fn is_complete(&self, _ctx: &SceneContext) -> bool {
        self.slots.all_activated()
    }

    fn next_scene(&self, current: usize, _ctx: &SceneContext) -> Option<usize> {
        Some(self.loop_to.unwrap_or(current + 1))
    }

    fn draw(&self, ctx: &SceneContext, frame: &mut Frame) {
        let spark = self.art.slot_lit;
        for flash in &self.flashes {
            let fade = flash.ticks_left as f32 / FLASH_TICKS as f32;
            let size = Vec2::splat(ctx.unit * spark.span as f32 * (2.0 - fade));
            let dest = Rect::centered(flash.pos, size);
            frame.push(
                SurfaceLayer::Effects,
                SpriteDraw::cell(spark.atlas, spark.col, spark.row, spark.span, ctx.cell_px(), dest)
                    .with_alpha(0.5 * fade),
            );
        }
        for (i, slot) in self.slots.iter().enumerate() {
            let pip = if slot.activated { self.art.pip_lit } else { self.art.pip_dark };
            let dest = Rect::new((i as f32 + 0.5) * ctx.unit, ctx.unit * 0.5, ctx.unit, ctx.unit);
            frame.push(
                SurfaceLayer::Ui,
                SpriteDraw::cell(pip.atlas, pip.col, pip.row, pip.span, ctx.cell_px(), dest),
            );
        }
    }
}

/// Everything one bug needs from the room for a single tick.
struct BugTurn<'a> {
    table: &'a TransitionTable,
    params: &'a BehaviorParams,
    art: &'a RoomArt,
    unit: f32,
    bounds: Rect,
    threat: Option<Vec2>,
    click: Option<Vec2>,
}

impl BugTurn<'_> {
    /// Advance one bug. Returns the slot position if it wired in this tick.
    fn run(
        &self,
        bug: &mut Entity,
        mind: &mut BugMind,
        slots: &mut SlotPool,
        rng: &mut ghost_engine::Rng,
    ) -> Option<Vec2> {
        match BugPhase::of(bug) {
            BugPhase::Wired => return None,
            BugPhase::Caged => {
                mind.caged_for = mind.caged_for.saturating_sub(1);
                if mind.caged_for == 0 && bug.release(self.table) {
                    bug.sprite = Some(self.art.bug);
                    mind.rest = REST_TICKS;
                }
                return None;
            }
            _ => {}
        }

        if let Some(p) = self.click {
            let hit = Rect::centered(bug.pos, bug.size).expand(self.unit * 0.25);
            if hit.contains(p) && bug.pin(self.table) {
                mind.caged_for = CAGE_TICKS;
                bug.sprite = Some(self.art.bug_caged);
                return None;
            }
        }

        mind.patience = mind.patience.saturating_sub(1);
        if !slots.is_available(mind.slot) {
            if let Some(other) = slots.nearest_available(bug.pos) {
                mind.slot = other;
            }
        }
        let goal = slots
            .get(mind.slot)
            .filter(|s| !s.activated)
            .map(|s| s.pos)
            .filter(|&pos| mind.patience == 0 || bug.pos.distance(pos) <= sense_range(self.unit));

        if bug.state == EntityState::Idle && goal.is_none() {
            if mind.rest > 0 {
                mind.rest -= 1;
            } else {
                let point = rng.point_in(self.bounds, self.unit);
                bug.seek_to(self.table, Trigger::TargetChosen, point, Intent::Wander);
            }
        }

        let sensors = Sensors {
            anchor: None,
            threat: self.threat,
            goal,
        };
        let arrival = step(bug, self.table, self.params, &sensors, self.bounds)?;
        let on_slot = slots.get(mind.slot).is_some_and(|s| s.pos == arrival.at);
        match arrival.intent {
            Intent::Goal if on_slot && slots.activate(mind.slot) => Some(arrival.at),
            Intent::Goal | Intent::Wander => {
                // Reached a slot that is taken or no longer ours, or a wander leg is over.
                bug.fire(self.table, Trigger::EffectApplied);
                mind.rest = REST_TICKS;
                None
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Interlude
// ---------------------------------------------------------------------------

/// Breather between rooms: the ghost floats over a backdrop for a fixed time.
/// A click skips it.
pub struct Interlude {
    band: u32,
    ticks: u64,
    skipped: bool,
    table: TransitionTable,
}

impl Interlude {
    pub fn new(band: u32, ticks: u64) -> Self {
        Self {
            band,
            ticks,
            skipped: false,
            table: ghost_table(),
        }
    }
}

impl SceneController for Interlude {
    fn name(&self) -> &'static str {
        "interlude"
    }

    fn on_enter(&mut self, ctx: &mut SceneContext) {
        self.skipped = false;
        ctx.backdrop = Some(backdrop(self.band));
        let mid = (ctx.config.grid_width / 2, ctx.config.grid_height / 2);
        spawn_ghost(ctx, mid);
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &InputSnapshot) {
        let bounds = ctx.bounds;
        let params = ghost_params(ctx.unit);
        if let Some(ghost) = ctx.roster.find_by_tag_mut("ghost") {
            step_ghost(ghost, &self.table, &params, None, bounds);
        }
        if input.pressed {
            self.skipped = true;
        }
    }

    fn is_complete(&self, ctx: &SceneContext) -> bool {
        self.skipped || ctx.scene_ticks >= self.ticks
    }
}
