//! Entity roles: what each actor in a room is, and the tables that drive it.

use ghost_engine::{BehaviorParams, Entity, EntityState, Intent, SeekParams, TransitionTable, Trigger};

/// Ticks a clicked bug stays caged.
pub const CAGE_TICKS: u32 = 180;
/// Ticks a bug rests between wander legs.
pub const REST_TICKS: u32 = 45;
/// Ticks the spark over a freshly wired slot lasts.
pub const FLASH_TICKS: u32 = 30;

/// Role-specific data for one roster entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Follows the pointer.
    Ghost,
    WireBug(BugMind),
    /// Draw stand-in for slot `index` of the room's pool.
    Slot { index: usize },
}

/// A wire bug's private counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugMind {
    /// Slot this bug means to wire into.
    pub slot: usize,
    /// Ticks of wandering left before it heads for its slot.
    pub patience: u32,
    /// Ticks left in the cage.
    pub caged_for: u32,
    /// Ticks left before the next wander leg.
    pub rest: u32,
}

impl BugMind {
    pub fn new(slot: usize, patience: u32) -> Self {
        Self {
            slot,
            patience,
            caged_for: 0,
            rest: REST_TICKS,
        }
    }
}

/// What a wire bug is doing, as the player sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugPhase {
    Wander,
    Wiring,
    Wired,
    Running,
    Caged,
}

impl BugPhase {
    pub fn of(entity: &Entity) -> Self {
        match (entity.state, entity.intent) {
            (EntityState::Attached, _) => BugPhase::Caged,
            (EntityState::Arrived, Intent::Goal) => BugPhase::Wired,
            (EntityState::Seeking, Intent::Goal) => BugPhase::Wiring,
            (EntityState::Fleeing, _) => BugPhase::Running,
            _ => BugPhase::Wander,
        }
    }
}

/// The ghost idles, chases the pointer, and settles back to idle on arrival.
pub fn ghost_table() -> TransitionTable {
    TransitionTable::standard()
}

/// Like the standard template, but a wired bug can't be caged. The scene never
/// applies an effect after a goal arrival, so wired bugs stay put.
pub fn bug_table() -> TransitionTable {
    TransitionTable::standard().without(EntityState::Arrived, Trigger::Pinned)
}

/// Ghost radii and speeds for a given unit size.
pub fn ghost_params(unit: f32) -> BehaviorParams {
    BehaviorParams {
        capture_radius: f32::MAX,
        seek: SeekParams {
            max_speed: unit * 0.3,
            accel: unit * 0.03,
            decel_radius: unit * 2.0,
            min_speed: unit * 0.05,
            arrive_epsilon: 0.5,
        },
        ..BehaviorParams::default()
    }
}

/// Bug radii and speeds for a given unit size.
pub fn bug_params(unit: f32) -> BehaviorParams {
    BehaviorParams {
        spook_radius: unit * 3.0,
        run_distance: unit * 5.0,
        seek: SeekParams {
            max_speed: unit * 0.15,
            accel: unit * 0.02,
            decel_radius: unit,
            min_speed: unit * 0.05,
            arrive_epsilon: 0.5,
        },
        flee: SeekParams::constant(unit * 0.35),
        goal_overrides_threat: true,
        ..BehaviorParams::default()
    }
}

/// How close a bug must be to its slot to go for it regardless of patience.
pub fn sense_range(unit: f32) -> f32 {
    unit * 4.0
}
