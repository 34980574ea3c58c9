//! Tick-driven animation helpers: idle bobbing, walk cycles and facing buckets.
//!
//! Everything here advances per fixed tick rather than per second, so a paused
//! game freezes its animations without any extra bookkeeping.

/// Cosmetic vertical oscillation shown while an entity idles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    /// Current phase in radians.
    pub phase: f32,
    /// Phase added per idle tick.
    pub increment: f32,
    /// Peak displacement in pixels.
    pub amplitude: f32,
}

impl Default for Bob {
    fn default() -> Self {
        Self {
            phase: 0.0,
            increment: 0.1,
            amplitude: 0.0,
        }
    }
}

impl Bob {
    pub fn new(increment: f32, amplitude: f32) -> Self {
        Self {
            phase: 0.0,
            increment,
            amplitude,
        }
    }

    pub fn advance(&mut self) {
        self.phase = (self.phase + self.increment) % std::f32::consts::TAU;
    }

    /// Vertical displacement for the current phase.
    pub fn offset(&self) -> f32 {
        self.amplitude * self.phase.sin()
    }
}

/// Two-frame walk toggle advanced once every `period` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkCycle {
    pub period: u32,
    pub frames: u32,
    counter: u32,
    frame: u32,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self::new(8, 2)
    }
}

impl WalkCycle {
    pub fn new(period: u32, frames: u32) -> Self {
        Self {
            period: period.max(1),
            frames: frames.max(1),
            counter: 0,
            frame: 0,
        }
    }

    /// Advance one tick. Returns true when the visible frame changed.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter < self.period {
            return false;
        }
        self.counter = 0;
        self.frame = (self.frame + 1) % self.frames;
        true
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}

/// Quantize a motion angle (degrees) into one of `buckets` facings.
///
/// Bucket 0 starts at 0° (the +x axis) and buckets are contiguous in the
/// direction of increasing angle.
pub fn facing_bucket(angle_deg: f32, buckets: u32) -> u32 {
    let buckets = buckets.clamp(1, 360);
    let width = 360 / buckets;
    let angle = angle_deg.rem_euclid(360.0) as u32;
    (angle / width) % buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_bucket_boundaries() {
        assert_eq!(facing_bucket(200.0, 4), facing_bucket(210.0, 4));
        assert_ne!(facing_bucket(200.0, 4), facing_bucket(170.0, 4));
        assert_eq!(facing_bucket(0.0, 4), 0);
        assert_eq!(facing_bucket(89.9, 4), 0);
        assert_eq!(facing_bucket(90.0, 4), 1);
        assert_eq!(facing_bucket(359.9, 4), 3);
    }

    #[test]
    fn bucket_count_is_clamped() {
        assert_eq!(facing_bucket(123.0, 0), 0);
        assert_eq!(facing_bucket(123.0, 1), 0);
        assert_eq!(facing_bucket(123.0, 1000), 123);
        assert_eq!(facing_bucket(359.0, u32::MAX), 359);
    }

    #[test]
    fn eight_buckets_and_negative_angles() {
        assert_eq!(facing_bucket(45.0, 8), 1);
        assert_eq!(facing_bucket(-10.0, 8), 7);
        assert_eq!(facing_bucket(720.0, 8), 0);
    }

    #[test]
    fn walk_cycle_toggles_every_period() {
        let mut walk = WalkCycle::new(3, 2);
        assert!(!walk.tick());
        assert!(!walk.tick());
        assert!(walk.tick());
        assert_eq!(walk.frame(), 1);
        for _ in 0..3 {
            walk.tick();
        }
        assert_eq!(walk.frame(), 0);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut bob = Bob::new(0.3, 2.0);
        for _ in 0..100 {
            bob.advance();
            assert!(bob.offset().abs() <= 2.0);
        }
    }
}
