use std::time::{Duration, Instant};

/// Rings once `duration` has passed since it was created or last reset.
/// Polled from the owner's update loop; it never fires on its own.
pub struct Timer {
    duration: Duration,
    last: Instant,
}

impl Timer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            last: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn ringing(&self) -> bool {
        self.last.elapsed() >= self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }
}
