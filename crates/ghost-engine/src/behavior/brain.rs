//! Per-tick sensing and movement for one entity.

use glam::Vec2;

use crate::behavior::state::{EntityState, Intent, Trigger, TransitionTable};
use crate::behavior::steering::{flee_target, seek, SeekParams};
use crate::components::entity::Entity;
use crate::core::bounds::Rect;

/// What a role can perceive this tick. `None` means the sensor is not wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sensors {
    /// Pursuit anchor, e.g. the pointer.
    pub anchor: Option<Vec2>,
    /// Something to run from.
    pub threat: Option<Vec2>,
    /// Completion target assigned by the role.
    pub goal: Option<Vec2>,
}

/// Radii and speed ramps for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorParams {
    /// Anchor distance that starts a pursuit.
    pub capture_radius: f32,
    /// Threat distance that starts a flight.
    pub spook_radius: f32,
    /// How far a fleeing entity runs.
    pub run_distance: f32,
    pub seek: SeekParams,
    pub flee: SeekParams,
    /// An entity closing on its goal does not flee.
    pub goal_overrides_threat: bool,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            capture_radius: 0.0,
            spook_radius: 0.0,
            run_distance: 0.0,
            seek: SeekParams::default(),
            flee: SeekParams::default(),
            goal_overrides_threat: true,
        }
    }
}

/// Reported on the tick an entity reaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    /// What the entity was doing when it arrived.
    pub intent: Intent,
    pub at: Vec2,
}

/// Pick the highest-priority trigger the sensors raise, and apply it if the
/// table accepts it. Priority: goal, then threat, then anchor.
pub fn sense(
    entity: &mut Entity,
    table: &TransitionTable,
    params: &BehaviorParams,
    sensors: &Sensors,
    bounds: Rect,
) -> Option<Trigger> {
    if entity.state == EntityState::Attached {
        return None;
    }

    if let Some(goal) = sensors.goal {
        let already = entity.intent == Intent::Goal && entity.target == goal && entity.is_moving();
        if !already
            && entity.state != EntityState::Arrived
            && entity.seek_to(table, Trigger::GoalAssigned, goal, Intent::Goal)
        {
            return Some(Trigger::GoalAssigned);
        }
    }

    if let Some(threat) = sensors.threat {
        let closing_on_goal = entity.intent == Intent::Goal && entity.is_moving();
        let suppressed = params.goal_overrides_threat && closing_on_goal;
        if !suppressed
            && entity.intent != Intent::Flee
            && entity.pos.distance(threat) <= params.spook_radius
        {
            let run_to = flee_target(entity.pos, threat, params.run_distance, bounds);
            if entity.seek_to(table, Trigger::ThreatNear, run_to, Intent::Flee) {
                return Some(Trigger::ThreatNear);
            }
        }
    }

    if let Some(anchor) = sensors.anchor {
        let dist = entity.pos.distance(anchor);
        let stale = entity.intent != Intent::Pursue || entity.target != anchor;
        if stale
            && dist > params.seek.arrive_epsilon
            && dist <= params.capture_radius
            && entity.seek_to(table, Trigger::AnchorNear, anchor, Intent::Pursue)
        {
            return Some(Trigger::AnchorNear);
        }
    }

    None
}

/// Advance one tick: sense, then move or bob. Returns the arrival, if any.
///
/// Positions are not clamped here; the scene clamps every entity after all
/// of them have moved.
pub fn step(
    entity: &mut Entity,
    table: &TransitionTable,
    params: &BehaviorParams,
    sensors: &Sensors,
    bounds: Rect,
) -> Option<Arrival> {
    entity.animation_phase = entity.animation_phase.wrapping_add(1);
    sense(entity, table, params, sensors, bounds);

    match entity.state {
        EntityState::Seeking | EntityState::Fleeing => {
            let ramp = if entity.state == EntityState::Fleeing {
                &params.flee
            } else {
                &params.seek
            };
            let moved = seek(entity.pos, entity.target, entity.speed, entity.angle, ramp);
            entity.pos = moved.pos;
            entity.speed = moved.speed;
            entity.angle = moved.angle;
            entity.walk.tick();

            if moved.arrived {
                let intent = entity.intent;
                entity.fire(table, Trigger::TargetReached);
                return Some(Arrival {
                    intent,
                    at: entity.pos,
                });
            }
            None
        }
        EntityState::Idle => {
            entity.bob.advance();
            None
        }
        EntityState::Arrived | EntityState::Attached => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 300.0)
    }

    fn params() -> BehaviorParams {
        BehaviorParams {
            capture_radius: 100.0,
            spook_radius: 40.0,
            run_distance: 60.0,
            ..BehaviorParams::default()
        }
    }

    #[test]
    fn idle_bobs_until_anchor_is_close() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(50.0, 50.0));
        e.bob.amplitude = 2.0;
        let far = Sensors {
            anchor: Some(Vec2::new(300.0, 250.0)),
            ..Sensors::default()
        };
        step(&mut e, &table, &params(), &far, bounds());
        assert_eq!(e.state, EntityState::Idle);
        assert!(e.bob.phase > 0.0);
        assert_eq!(e.pos, Vec2::new(50.0, 50.0));

        let near = Sensors {
            anchor: Some(Vec2::new(90.0, 50.0)),
            ..Sensors::default()
        };
        step(&mut e, &table, &params(), &near, bounds());
        assert_eq!(e.state, EntityState::Seeking);
        assert_eq!(e.intent, Intent::Pursue);
        assert!(e.pos.x > 50.0);
    }

    #[test]
    fn seeking_is_monotonic_and_arrives() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(10.0, 10.0));
        e.seek_to(&table, Trigger::TargetChosen, Vec2::new(200.0, 120.0), Intent::Wander);
        let mut arrival = None;
        for _ in 0..400 {
            let before = e.distance_to_target();
            arrival = step(&mut e, &table, &params(), &Sensors::default(), bounds());
            assert!(e.distance_to_target() <= before);
            if arrival.is_some() {
                break;
            }
        }
        let arrival = arrival.expect("should arrive");
        assert_eq!(arrival.intent, Intent::Wander);
        assert_eq!(e.pos, Vec2::new(200.0, 120.0));
        assert_eq!(e.state, EntityState::Arrived);
    }

    #[test]
    fn threat_triggers_flight_away_from_it() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(200.0, 150.0));
        let sensors = Sensors {
            threat: Some(Vec2::new(180.0, 150.0)),
            ..Sensors::default()
        };
        step(&mut e, &table, &params(), &sensors, bounds());
        assert_eq!(e.state, EntityState::Fleeing);
        assert_eq!(e.target, Vec2::new(260.0, 150.0));
        assert!(e.pos.x > 200.0);
    }

    #[test]
    fn fleeing_returns_to_idle_on_arrival() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(200.0, 150.0));
        let threat = Sensors {
            threat: Some(Vec2::new(190.0, 150.0)),
            ..Sensors::default()
        };
        step(&mut e, &table, &params(), &threat, bounds());
        for _ in 0..200 {
            if step(&mut e, &table, &params(), &Sensors::default(), bounds()).is_some() {
                break;
            }
        }
        assert_eq!(e.state, EntityState::Idle);
        assert_eq!(e.intent, Intent::None);
    }

    #[test]
    fn goal_beats_threat() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(100.0, 100.0));
        let sensors = Sensors {
            goal: Some(Vec2::new(300.0, 100.0)),
            threat: Some(Vec2::new(110.0, 100.0)),
            anchor: None,
        };
        for _ in 0..5 {
            step(&mut e, &table, &params(), &sensors, bounds());
            assert_eq!(e.state, EntityState::Seeking);
            assert_eq!(e.intent, Intent::Goal);
        }
    }

    #[test]
    fn threat_wins_when_precedence_is_disabled() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(100.0, 100.0));
        let p = BehaviorParams {
            goal_overrides_threat: false,
            ..params()
        };
        e.seek_to(&table, Trigger::GoalAssigned, Vec2::new(300.0, 100.0), Intent::Goal);
        let sensors = Sensors {
            threat: Some(Vec2::new(110.0, 100.0)),
            ..Sensors::default()
        };
        step(&mut e, &table, &p, &sensors, bounds());
        assert_eq!(e.state, EntityState::Fleeing);
    }

    #[test]
    fn attached_holds_still() {
        let table = TransitionTable::standard();
        let mut e = Entity::new(EntityId(1)).with_pos(Vec2::new(100.0, 100.0));
        e.pin(&table);
        let sensors = Sensors {
            anchor: Some(Vec2::new(120.0, 100.0)),
            threat: Some(Vec2::new(101.0, 100.0)),
            goal: Some(Vec2::new(10.0, 10.0)),
        };
        for _ in 0..10 {
            assert!(step(&mut e, &table, &params(), &sensors, bounds()).is_none());
        }
        assert_eq!(e.pos, Vec2::new(100.0, 100.0));
        assert_eq!(e.state, EntityState::Attached);
    }
}
