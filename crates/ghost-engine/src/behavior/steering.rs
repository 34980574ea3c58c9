//! Linear seek-and-stop movement with a simple ease-in / ease-out speed ramp.

use glam::Vec2;

use crate::core::bounds::Rect;

/// Speed ramp for seeking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekParams {
    /// Top speed in pixels per tick.
    pub max_speed: f32,
    /// Speed gained per tick while accelerating.
    pub accel: f32,
    /// Inside this distance the speed is scaled down toward `min_speed`.
    pub decel_radius: f32,
    /// Floor for the decelerated speed.
    pub min_speed: f32,
    /// Distance at which the entity snaps onto its target.
    pub arrive_epsilon: f32,
}

impl Default for SeekParams {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            accel: 0.5,
            decel_radius: 32.0,
            min_speed: 0.5,
            arrive_epsilon: 0.5,
        }
    }
}

impl SeekParams {
    /// Constant-speed seek with no ramp.
    pub fn constant(speed: f32) -> Self {
        Self {
            max_speed: speed,
            accel: speed,
            decel_radius: 0.0,
            min_speed: speed,
            arrive_epsilon: 0.5,
        }
    }
}

/// Result of one seek step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep {
    pub pos: Vec2,
    pub speed: f32,
    /// Motion angle in degrees [0, 360), unchanged when not moving.
    pub angle: f32,
    /// Position was snapped onto the target this step.
    pub arrived: bool,
}

/// Motion angle of `dir` in degrees [0, 360): 0° along +x, growing toward +y.
pub fn angle_of(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees().rem_euclid(360.0)
}

/// Advance `pos` toward `target` by at most the remaining distance.
pub fn seek(pos: Vec2, target: Vec2, speed: f32, angle: f32, params: &SeekParams) -> SeekStep {
    let to_target = target - pos;
    let dist = to_target.length();

    if dist <= params.arrive_epsilon {
        return SeekStep {
            pos: target,
            speed: 0.0,
            angle,
            arrived: true,
        };
    }

    let mut speed = (speed + params.accel).min(params.max_speed);
    if params.decel_radius > 0.0 && dist < params.decel_radius {
        let eased = params.max_speed * dist / params.decel_radius;
        speed = speed.min(eased.max(params.min_speed));
    }
    let speed = speed.max(params.min_speed.min(params.max_speed));

    let step = speed.min(dist);
    let dir = to_target / dist;
    let arrived = dist - step <= params.arrive_epsilon;

    SeekStep {
        pos: if arrived { target } else { pos + dir * step },
        speed: if arrived { 0.0 } else { speed },
        angle: angle_of(dir),
        arrived,
    }
}

/// Point `run_distance` away from `threat`, starting at `pos`, kept inside `bounds`.
pub fn flee_target(pos: Vec2, threat: Vec2, run_distance: f32, bounds: Rect) -> Vec2 {
    let away = (pos - threat).try_normalize().unwrap_or(Vec2::X);
    bounds.clamp(pos + away * run_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_never_overshoots() {
        let params = SeekParams::default();
        let target = Vec2::new(100.0, 40.0);
        let mut pos = Vec2::new(0.0, 0.0);
        let mut speed = 0.0;
        let mut angle = 0.0;
        for _ in 0..500 {
            let before = pos.distance(target);
            let step = seek(pos, target, speed, angle, &params);
            let after = step.pos.distance(target);
            assert!(after <= before, "{} > {}", after, before);
            pos = step.pos;
            speed = step.speed;
            angle = step.angle;
            if step.arrived {
                break;
            }
        }
        assert_eq!(pos, target);
    }

    #[test]
    fn speed_ramps_up_to_max() {
        let params = SeekParams::default();
        let mut pos = Vec2::ZERO;
        let mut speed = 0.0;
        let target = Vec2::new(1000.0, 0.0);
        for _ in 0..20 {
            let step = seek(pos, target, speed, 0.0, &params);
            assert!(step.speed >= speed || step.speed == params.max_speed);
            pos = step.pos;
            speed = step.speed;
        }
        assert_eq!(speed, params.max_speed);
    }

    #[test]
    fn within_epsilon_snaps() {
        let params = SeekParams::default();
        let step = seek(Vec2::new(10.2, 10.0), Vec2::new(10.0, 10.0), 3.0, 45.0, &params);
        assert!(step.arrived);
        assert_eq!(step.pos, Vec2::new(10.0, 10.0));
        assert_eq!(step.angle, 45.0);
    }

    #[test]
    fn angle_convention() {
        assert_eq!(angle_of(Vec2::X), 0.0);
        assert!((angle_of(Vec2::Y) - 90.0).abs() < 1e-4);
        assert!((angle_of(-Vec2::X) - 180.0).abs() < 1e-4);
        assert!((angle_of(-Vec2::Y) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn flee_runs_away_and_stays_inside() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
        let t = flee_target(Vec2::new(100.0, 100.0), Vec2::new(90.0, 100.0), 50.0, bounds);
        assert_eq!(t, Vec2::new(150.0, 100.0));
        let edge = flee_target(Vec2::new(190.0, 100.0), Vec2::new(180.0, 100.0), 50.0, bounds);
        assert_eq!(edge, Vec2::new(200.0, 100.0));
        let same = flee_target(Vec2::new(20.0, 20.0), Vec2::new(20.0, 20.0), 10.0, bounds);
        assert_eq!(same, Vec2::new(30.0, 20.0));
    }
}
