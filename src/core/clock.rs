use std::time::Instant;

/// Clamp a raw frame delta into `[0, max]`. Non-finite deltas become zero.
pub fn clamp_delta(delta: f32, max: f32) -> f32 {
    if !delta.is_finite() || delta <= 0.0 {
        return 0.0;
    }
    delta.min(max.max(0.0))
}

/// Minimal frame clock - tracks wall-clock delta and frame count
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    frames: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frames: 0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frames += 1;
        delta
    }

    /// Same as `tick`, bounded so a stalled frame cannot blow up the integrator
    pub fn tick_clamped(&mut self, max: f32) -> f32 {
        clamp_delta(self.tick(), max)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn clock_clamps_stalls() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(30));
        let delta = clock.tick_clamped(0.005);

        assert_eq!(delta, 0.005);
    }

    #[test]
    fn clamp_delta_rejects_garbage() {
        assert_eq!(clamp_delta(f32::NAN, 0.05), 0.0);
        assert_eq!(clamp_delta(-1.0, 0.05), 0.0);
        assert_eq!(clamp_delta(f32::INFINITY, 0.05), 0.0);
        assert_eq!(clamp_delta(0.01, 0.05), 0.01);
        assert_eq!(clamp_delta(2.0, 0.05), 0.05);
    }
}
