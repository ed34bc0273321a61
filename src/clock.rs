/// Match timing, in seconds on the caller's time base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchClock {
    pub start_time: f64,
    pub duration: f64,
}

impl MatchClock {
    pub fn new(start_time: f64, duration: f64) -> Self {
        MatchClock {
            start_time,
            duration,
        }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_time).max(0.0)
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.duration - self.elapsed(now)).max(0.0)
    }

    pub fn is_over(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration
    }
}
