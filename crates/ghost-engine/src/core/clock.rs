/// One fixed-rate tick produced by [`Clock::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    /// Number of advances since the clock started, starting at 1.
    pub frame: u64,
    /// Wall time since the previous advance (may exceed the interval after a stall).
    pub elapsed_ms: f64,
}

/// Fixed-rate tick clock.
///
/// Converts host timestamps into at most one advance per call. Remainders are
/// carried into the next interval so the rate does not drift; long stalls are
/// absorbed instead of replayed.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Milliseconds per tick.
    interval: f64,
    /// Timestamp the current interval is measured from.
    last_tick: Option<f64>,
    frame: u64,
}

impl Clock {
    /// Create a clock targeting `rate_hz` ticks per second.
    pub fn new(rate_hz: f64) -> Self {
        Self::with_interval(1000.0 / rate_hz)
    }

    pub fn with_interval(interval_ms: f64) -> Self {
        Self {
            interval: interval_ms,
            last_tick: None,
            frame: 0,
        }
    }

    /// Begin measuring from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.last_tick = Some(now_ms);
        self.frame = 0;
    }

    /// Feed the current time. Returns an advance when a full interval has elapsed.
    pub fn tick(&mut self, now_ms: f64) -> Option<Advance> {
        let Some(last) = self.last_tick else {
            self.start(now_ms);
            return None;
        };

        let elapsed = now_ms - last;
        if elapsed < self.interval {
            return None;
        }

        let mut rem = elapsed % self.interval;
        // Float remainder of an exact multiple can come out as ~interval.
        if self.interval - rem <= self.interval * 1e-9 {
            rem = 0.0;
        }
        self.last_tick = Some(now_ms - rem);
        self.frame += 1;
        Some(Advance {
            frame: self.frame,
            elapsed_ms: elapsed,
        })
    }

    /// The fixed tick interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.interval
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: f64 = 1000.0 / 60.0;

    #[test]
    fn first_tick_only_starts() {
        let mut clock = Clock::new(60.0);
        assert!(clock.tick(1000.0).is_none());
        assert_eq!(clock.last_tick(), Some(1000.0));
    }

    #[test]
    fn one_interval_is_one_advance() {
        let mut clock = Clock::new(60.0);
        clock.start(0.0);
        assert!(clock.tick(INTERVAL - 0.01).is_none());
        let adv = clock.tick(INTERVAL).expect("advance");
        assert_eq!(adv.frame, 1);
    }

    #[test]
    fn fast_host_calls_never_exceed_the_rate() {
        let mut clock = Clock::new(60.0);
        clock.start(0.0);
        let mut advances = 0;
        let mut now = 0.0;
        let mut last_advance_at = 0.0;
        while now < 1000.0 {
            now += 5.0;
            if clock.tick(now).is_some() {
                // never more than once per interval
                if advances > 0 {
                    assert!(now - last_advance_at >= INTERVAL - 5.0);
                }
                advances += 1;
                last_advance_at = now;
                let drift = now - clock.last_tick().unwrap();
                assert!(drift >= 0.0 && drift < INTERVAL, "drift {}", drift);
            }
        }
        // 1000ms at 60Hz: 60 intervals, and the remainder carry keeps us there.
        assert!(advances <= 60, "advances {}", advances);
        assert!(advances >= 59, "advances {}", advances);
    }

    #[test]
    fn long_stall_is_absorbed() {
        let mut clock = Clock::new(60.0);
        clock.start(0.0);
        let adv = clock.tick(10_000.0).expect("advance");
        assert_eq!(adv.frame, 1);
        assert!(adv.elapsed_ms >= 10_000.0);
        // No catch-up burst on the following call.
        assert!(clock.tick(10_001.0).is_none());
        assert_eq!(clock.last_tick(), Some(10_000.0));
    }

    #[test]
    fn whole_interval_gaps_rebase_onto_now() {
        let mut clock = Clock::new(60.0);
        clock.start(0.0);
        let mut now = 0.0;
        for _ in 0..40 {
            now += 50.0;
            assert!(clock.tick(now).is_some());
            assert_eq!(clock.last_tick(), Some(now));
            assert!(clock.tick(now + 1.0).is_none());
        }
    }

    #[test]
    fn rebase_keeps_the_remainder() {
        let mut clock = Clock::with_interval(10.0);
        clock.start(0.0);
        clock.tick(25.0).expect("advance");
        assert_eq!(clock.last_tick(), Some(20.0));
        assert!(clock.tick(29.0).is_none());
        assert!(clock.tick(30.0).is_some());
    }
}
