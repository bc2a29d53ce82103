use std::time::Instant;

/// Monotonic time source in seconds since some fixed start.
///
/// Jump timing reads absolute time; frame deltas are differences of two reads.
pub trait Clock {
    fn now_seconds(&self) -> f64;
}

/// Wall clock backed by [`Instant`], measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and scripted runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: f64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now_seconds(), 0.0);
        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.now_seconds(), 0.5);
        clock.set(10.0);
        assert_eq!(clock.now_seconds(), 10.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_seconds();
        let b = clock.now_seconds();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
