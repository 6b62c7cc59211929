use serde::{Deserialize, Serialize};

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get progress [0, 1]; a zero-length countdown is always complete
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // Inactive

        timer.start();
        assert!(!timer.tick(0.5)); // In progress
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6)); // Complete
        assert!(!timer.tick(0.1)); // Inactive again
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut timer = Countdown::new(0.0);
        timer.start();
        assert_eq!(timer.progress(), 1.0);
        assert!(timer.tick(0.0));
        assert!(!timer.is_active());
    }
}
