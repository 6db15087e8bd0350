use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic millisecond clock read by the scheduler.
///
/// Read once at `create` (start timestamp) and once per tick, so every
/// animation in a tick progresses against the same instant.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-independent clock backed by [`Instant`], measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Explicitly driven clock. Clones share the same reading, so a host (or a
/// test) can keep one copy and advance the copy owned by the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Fixed-interval tick accumulator.
/// Turns variable frame time into a whole number of scheduler ticks.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    /// The fixed interval per tick.
    interval: Duration,
    /// Time carried over from previous frames.
    accumulator: Duration,
}

impl TickAccumulator {
    /// Upper bound on ticks produced by a single `accumulate` call.
    pub const MAX_CATCH_UP: u32 = 10;

    /// Intervals below 1 ms are raised to 1 ms.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
        }
    }

    /// Add frame time. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame;
        // Cap to prevent a spiral of death after a long stall
        self.accumulator = self.accumulator.min(self.interval * Self::MAX_CATCH_UP);
        let steps = (self.accumulator.as_nanos() / self.interval.as_nanos()) as u32;
        self.accumulator -= self.interval * steps;
        steps
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(33);

    #[test]
    fn one_step_exact() {
        let mut ts = TickAccumulator::new(TICK);
        assert_eq!(ts.accumulate(TICK), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = TickAccumulator::new(TICK);
        assert_eq!(ts.accumulate(Duration::from_millis(20)), 0);
        assert_eq!(ts.accumulate(Duration::from_millis(20)), 1);
        assert_eq!(ts.until_next(), Duration::from_millis(26));
    }

    #[test]
    fn caps_catch_up() {
        let mut ts = TickAccumulator::new(TICK);
        assert_eq!(ts.accumulate(Duration::from_secs(5)), TickAccumulator::MAX_CATCH_UP);
    }

    #[test]
    fn zero_interval_is_raised() {
        let ts = TickAccumulator::new(Duration::ZERO);
        assert_eq!(ts.interval(), Duration::from_millis(1));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(100);
        let shared = clock.clone();
        clock.advance(50);
        assert_eq!(shared.now_ms(), 150);
        shared.set(10);
        assert_eq!(clock.now_ms(), 10);
    }
}
