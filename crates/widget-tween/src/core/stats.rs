use std::time::Duration;
use serde::Serialize;

/// Observational counters. Never consulted for control decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    /// Successful `create` calls since startup.
    pub total_created: u64,
    /// Completion events handed to a sink.
    pub total_callbacks: u64,
    /// Silent animations created.
    pub silent_created: u64,
    /// Highest number of simultaneously active animations.
    pub peak_concurrent: usize,
    /// Wall time spent in the most recent tick.
    pub last_tick: Duration,
}

impl Stats {
    pub(crate) fn record_active(&mut self, active: usize) {
        self.peak_concurrent = self.peak_concurrent.max(active);
    }
}
