use std::time::{Duration, Instant};

/// Monotonic elapsed-time source for animation.
///
/// Starts on the first `elapsed_at` call, so time spent loading before the
/// first frame does not advance the animation.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed between the first read and `now`.
    pub fn elapsed_at(&mut self, now: Instant) -> Duration {
        let start = *self.started.get_or_insert(now);
        now.saturating_duration_since(start)
    }
}
