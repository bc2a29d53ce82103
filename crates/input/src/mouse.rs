use glam::Vec2;

/// Turns mouse samples into per-sample movement.
///
/// The first sample after construction or [`MouseTracker::reset`] only
/// establishes a baseline. Without this, recentering the cursor at startup
/// would register as one huge look movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseTracker {
    last: Vec2,
    initialized: bool,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Feed an absolute cursor position; returns movement since the previous sample.
    pub fn sample(&mut self, x: f32, y: f32) -> Vec2 {
        let position = Vec2::new(x, y);
        let delta = if self.initialized {
            position - self.last
        } else {
            self.initialized = true;
            Vec2::ZERO
        };
        self.last = position;
        delta
    }

    /// Feed a relative movement; the first one after a reset is swallowed.
    pub fn accept_delta(&mut self, dx: f32, dy: f32) -> Vec2 {
        if self.initialized {
            self.last += Vec2::new(dx, dy);
            Vec2::new(dx, dy)
        } else {
            self.initialized = true;
            Vec2::ZERO
        }
    }

    /// Forget the baseline; the next sample produces zero movement.
    pub fn reset(&mut self) {
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_baseline() {
        let mut tracker = MouseTracker::new();
        assert_eq!(tracker.sample(400.0, 300.0), Vec2::ZERO);
        assert!(tracker.is_initialized());
        assert_eq!(tracker.sample(410.0, 290.0), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn first_delta_is_swallowed() {
        let mut tracker = MouseTracker::new();
        assert_eq!(tracker.accept_delta(500.0, -500.0), Vec2::ZERO);
        assert_eq!(tracker.accept_delta(3.0, 4.0), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn reset_restarts_baseline() {
        let mut tracker = MouseTracker::new();
        tracker.sample(0.0, 0.0);
        tracker.sample(5.0, 5.0);
        tracker.reset();
        assert_eq!(tracker.sample(100.0, 100.0), Vec2::ZERO);
        assert_eq!(tracker.sample(101.0, 100.0), Vec2::new(1.0, 0.0));
    }
}
