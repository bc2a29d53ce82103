/// Time-driven jump arc.
///
/// The offset is a pure function of time since the jump started: one sine
/// half-period up and back down. There is no velocity or gravity; the arc
/// always has the same height and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpState {
    active: bool,
    start_time: f64,
    offset: f32,
    frequency: f32,
    amplitude: f32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self::new(5.0, 2.0)
    }
}

impl JumpState {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            active: false,
            start_time: 0.0,
            offset: 0.0,
            frequency,
            amplitude,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Current vertical offset; zero while idle.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Seconds from take-off until the arc crosses zero again.
    pub fn duration(&self) -> f64 {
        std::f64::consts::PI / self.frequency as f64
    }

    /// Start a jump at `now`. Returns `false` without changing anything if a
    /// jump is already in flight.
    pub fn trigger(&mut self, now: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.start_time = now;
        tracing::debug!(start = now, "jump started");
        true
    }

    /// Advance the arc to `now` and return the offset.
    pub fn update(&mut self, now: f64) -> f32 {
        if !self.active {
            return self.offset;
        }
        let elapsed = now - self.start_time;
        if elapsed > self.duration() {
            self.active = false;
            self.offset = 0.0;
            tracing::debug!(elapsed, "jump landed");
        } else {
            self.offset = ((elapsed * self.frequency as f64).sin() * self.amplitude as f64) as f32;
        }
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f32 = 1e-4;

    #[test]
    fn idle_until_triggered() {
        let mut jump = JumpState::default();
        assert_eq!(jump.update(3.0), 0.0);
        assert!(!jump.is_active());
    }

    #[test]
    fn offset_is_zero_at_takeoff() {
        let mut jump = JumpState::default();
        jump.trigger(10.0);
        assert!(jump.update(10.0).abs() < EPS);
        assert!(jump.is_active());
    }

    #[test]
    fn offset_peaks_at_quarter_period() {
        let mut jump = JumpState::default();
        jump.trigger(0.0);
        let peak = jump.update(PI / 10.0);
        assert!((peak - 2.0).abs() < EPS, "peak was {peak}");
    }

    #[test]
    fn offset_returns_to_zero_at_landing() {
        let mut jump = JumpState::default();
        jump.trigger(0.0);
        assert!(jump.update(PI / 5.0).abs() < EPS);
    }

    #[test]
    fn lands_after_duration() {
        let mut jump = JumpState::default();
        jump.trigger(1.0);
        jump.update(1.1);
        assert!(jump.offset() > 0.0);
        assert_eq!(jump.update(1.0 + PI / 5.0 + 0.01), 0.0);
        assert!(!jump.is_active());
    }

    #[test]
    fn second_trigger_while_airborne_is_ignored() {
        let mut jump = JumpState::default();
        assert!(jump.trigger(2.0));
        let before = jump;
        assert!(!jump.trigger(2.05));
        assert_eq!(jump, before);
        assert_eq!(jump.start_time(), 2.0);
    }

    #[test]
    fn can_jump_again_after_landing() {
        let mut jump = JumpState::default();
        jump.trigger(0.0);
        jump.update(1.0);
        assert!(jump.trigger(1.5));
        assert_eq!(jump.start_time(), 1.5);
    }

    #[test]
    fn custom_arc_scales_height_and_duration() {
        let mut jump = JumpState::new(10.0, 1.0);
        assert!((jump.duration() - PI / 10.0).abs() < 1e-12);
        jump.trigger(0.0);
        assert!((jump.update(PI / 20.0) - 1.0).abs() < EPS);
    }
}
