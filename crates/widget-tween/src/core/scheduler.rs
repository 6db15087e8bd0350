use std::time::Instant;
use log::{debug, trace, warn};
use crate::api::config::SchedulerConfig;
use crate::api::traits::{CompletionHandler, CompletionSink, Directory};
use crate::api::types::{AnimHandle, CompletionEvent, OwnerId, TargetId};
use crate::components::animation::{Animation, AnimationSlot};
use crate::core::pool::AnimationPool;
use crate::core::stats::Stats;
use crate::core::time::{Clock, MonotonicClock};
use crate::systems::batch::DirtyBatch;
use crate::systems::dispatch::CompletionQueue;
use crate::systems::tick::{self, TickReport};

/// Owns every active widget animation.
///
/// All methods take `&mut self` and are meant to be called from the one
/// sequence that also drives [`Scheduler::tick`]. Hosts that need access
/// from elsewhere serialize it themselves.
///
/// Per tick, the expected call order is `tick` then one of the dispatch
/// methods. [`Scheduler::dispatch_with`] and [`Scheduler::dispatch_to`] hand
/// the scheduler back to each callback, which may then create new
/// animations; those are first visited on the following tick.
pub struct Scheduler<C: Clock = MonotonicClock> {
    pool: AnimationPool,
    batch: DirtyBatch,
    completions: CompletionQueue,
    stats: Stats,
    clock: C,
    /// Set after the first failed `create`, cleared by the next success.
    saturated: bool,
}

impl Scheduler<MonotonicClock> {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl Default for Scheduler<MonotonicClock> {
    fn default() -> Self {
        Self::new(&SchedulerConfig::default())
    }
}

impl<C: Clock> Scheduler<C> {
    /// Build a scheduler from `config`. A capacity beyond the script handle
    /// range is clamped to it; [`SchedulerConfig::validate`] reports that case
    /// as an error for configs loaded from JSON.
    pub fn with_clock(config: &SchedulerConfig, clock: C) -> Self {
        let capacity = pool_capacity(config.capacity);
        Self {
            pool: AnimationPool::with_capacity(capacity),
            batch: DirtyBatch::with_capacity(config.owner_hint),
            completions: CompletionQueue::with_capacity(capacity),
            stats: Stats::default(),
            clock,
            saturated: false,
        }
    }

    /// Start an animation. Returns `None` when the pool is full; that is an
    /// expected outcome under load and the caller decides what to do.
    pub fn create(&mut self, animation: Animation) -> Option<AnimHandle> {
        let silent = animation.silent;
        let slot = AnimationSlot::populate(animation, self.clock.now_ms());
        let Some(handle) = self.pool.insert(slot) else {
            if !self.saturated {
                warn!(
                    "animation pool saturated ({} slots); create requests are being refused",
                    self.pool.capacity()
                );
                self.saturated = true;
            }
            return None;
        };

        self.saturated = false;
        self.stats.total_created += 1;
        if silent {
            self.stats.silent_created += 1;
        }
        self.stats.record_active(self.pool.active_count());
        Some(handle)
    }

    /// Stop an animation without notification. Returns false for unknown or
    /// already finished handles.
    pub fn stop(&mut self, handle: AnimHandle) -> bool {
        self.pool.release(handle)
    }

    pub fn is_active(&self, handle: AnimHandle) -> bool {
        self.pool.is_active(handle)
    }

    /// Stop every animation on one widget, without notification.
    pub fn stop_target(&mut self, owner: OwnerId, target: TargetId) -> usize {
        self.pool
            .release_where(|_, slot| slot.owner == owner && slot.target == target)
    }

    /// Stop every animation of `owner`.
    ///
    /// With `trigger_callbacks` each stopped non-silent animation queues a
    /// completion event (orderly teardown). Without it they vanish quietly
    /// (disconnects).
    pub fn cleanup_owner(&mut self, owner: OwnerId, trigger_callbacks: bool) -> usize {
        let completions = &mut self.completions;
        let removed = self.pool.release_where(|handle, slot| {
            if slot.owner != owner {
                return false;
            }
            if trigger_callbacks && !slot.silent {
                completions.push(slot.completion_event(handle));
            }
            true
        });
        if removed > 0 {
            debug!(
                "cleaned up {} animation(s) of owner {} (callbacks: {})",
                removed, owner.0, trigger_callbacks
            );
        }
        removed
    }

    /// Stop every animation and discard pending completion events.
    pub fn reset(&mut self) {
        let dropped = self.pool.active_count();
        self.pool.clear();
        self.batch.clear();
        self.completions.clear();
        self.saturated = false;
        debug!("scheduler reset, {} animation(s) dropped", dropped);
    }

    /// Advance every active animation to the current clock reading.
    pub fn tick<D: Directory>(&mut self, directory: &mut D) -> TickReport {
        let started = Instant::now();
        let now_ms = self.clock.now_ms();
        let report = tick::run(
            &mut self.pool,
            &mut self.batch,
            &mut self.completions,
            directory,
            now_ms,
        );
        self.stats.last_tick = started.elapsed();
        trace!(
            "tick @{}ms: visited={} completed={} cancelled={} commits={}",
            now_ms, report.visited, report.completed, report.cancelled, report.commits
        );
        report
    }

    /// Take the oldest pending completion event. Counts as a delivered
    /// callback.
    pub fn next_completion(&mut self) -> Option<CompletionEvent> {
        let event = self.completions.pop()?;
        self.stats.total_callbacks += 1;
        Some(event)
    }

    /// Deliver queued completion events in order, passing the scheduler to
    /// each call. Returns how many were delivered.
    ///
    /// The first error is returned unchanged; the failing event is consumed
    /// and the rest stay queued for the next call. Events queued by the
    /// callback itself are delivered in the same drain.
    pub fn dispatch_with<F, E>(&mut self, mut deliver: F) -> Result<usize, E>
    where
        F: FnMut(&mut Self, CompletionEvent) -> Result<(), E>,
    {
        let mut delivered = 0;
        while let Some(event) = self.next_completion() {
            delivered += 1;
            deliver(self, event)?;
        }
        Ok(delivered)
    }

    /// [`Scheduler::dispatch_with`] for a [`CompletionHandler`].
    pub fn dispatch_to<H>(&mut self, handler: &mut H) -> Result<usize, H::Error>
    where
        H: CompletionHandler<C> + ?Sized,
    {
        self.dispatch_with(|scheduler, event| handler.on_complete(scheduler, event))
    }

    /// Deliver queued completion events to a sink that does not need the
    /// scheduler. Same ordering and error behavior as `dispatch_with`.
    pub fn dispatch_completions<S>(&mut self, sink: &mut S) -> Result<usize, S::Error>
    where
        S: CompletionSink + ?Sized,
    {
        self.dispatch_with(|_, event| sink.on_complete(event))
    }

    /// Linear progress in [0, 1] of an active animation, at the current
    /// clock reading.
    pub fn progress(&self, handle: AnimHandle) -> Option<f32> {
        let now = self.clock.now_ms();
        self.pool.get(handle).map(|slot| slot.progress(now))
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Completion events waiting for `dispatch_completions`.
    pub fn pending_completions(&self) -> usize {
        self.completions.len()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

fn pool_capacity(requested: usize) -> usize {
    let capacity = requested.min(SchedulerConfig::MAX_CAPACITY);
    if capacity < requested {
        warn!(
            "pool capacity {} exceeds the script handle range, clamped to {}",
            requested, capacity
        );
    }
    capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::core::directory::{MemoryDirectory, MemoryOwner};
    use crate::components::widget::Widget;
    use crate::core::time::ManualClock;
    use crate::easing::Easing;
    use glam::Vec2;

    fn scheduler(capacity: usize) -> (Scheduler<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let config = SchedulerConfig { capacity, ..Default::default() };
        (Scheduler::with_clock(&config, clock.clone()), clock)
    }

    fn anim(owner: u32) -> Animation {
        Animation::new(OwnerId(owner), TargetId(1), 1_000, Easing::Linear)
            .position(Vec2::ZERO, Vec2::ONE)
    }

    #[test]
    fn saturation_refuses_and_tracks_peak() {
        let (mut s, _) = scheduler(3);
        for _ in 0..3 {
            assert!(s.create(anim(1)).is_some());
        }
        assert_eq!(s.create(anim(1)), None);
        assert_eq!(s.stats().peak_concurrent, 3);
        assert_eq!(s.stats().total_created, 3);
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut s, _) = scheduler(2);
        let h = s.create(anim(1)).unwrap();
        assert!(s.stop(h));
        assert!(!s.stop(h));
        assert!(!s.stop(AnimHandle(40)));
        assert!(!s.is_active(h));
    }

    #[test]
    fn silent_creations_are_counted() {
        let (mut s, _) = scheduler(4);
        s.create(anim(1).silent());
        s.create(anim(1));
        assert_eq!(s.stats().silent_created, 1);
    }

    #[test]
    fn progress_follows_clock() {
        let (mut s, clock) = scheduler(1);
        let h = s.create(anim(1)).unwrap();
        clock.advance(250);
        assert!((s.progress(h).unwrap() - 0.25).abs() < 1e-6);
        s.stop(h);
        assert_eq!(s.progress(h), None);
    }

    #[test]
    fn cleanup_without_callbacks_is_quiet() {
        let (mut s, _) = scheduler(4);
        s.create(anim(1));
        s.create(anim(2));
        assert_eq!(s.cleanup_owner(OwnerId(1), false), 1);
        assert_eq!(s.pending_completions(), 0);
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn stop_target_only_hits_that_widget() {
        let (mut s, _) = scheduler(4);
        let a = s.create(anim(1)).unwrap();
        let mut other = anim(1);
        other.target = TargetId(2);
        let b = s.create(other).unwrap();
        assert_eq!(s.stop_target(OwnerId(1), TargetId(1)), 1);
        assert!(!s.is_active(a));
        assert!(s.is_active(b));
    }

    #[test]
    fn reset_clears_everything() {
        let (mut s, _) = scheduler(2);
        s.create(anim(1));
        s.create(anim(1));
        s.cleanup_owner(OwnerId(1), true);
        s.create(anim(3));
        s.reset();
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.pending_completions(), 0);
        assert_eq!(s.create(anim(1)), Some(AnimHandle(0)));
    }

    #[test]
    fn tick_records_its_duration() {
        let (mut s, clock) = scheduler(512);
        let mut dir = MemoryDirectory::new();
        dir.connect(MemoryOwner::new(OwnerId(1)).with_widget(Widget::new(TargetId(1))));
        for _ in 0..512 {
            s.create(anim(1));
        }
        assert_eq!(s.stats().last_tick, Duration::ZERO);

        clock.advance(10);
        assert_eq!(s.tick(&mut dir).visited, 512);
        assert!(s.stats().last_tick > Duration::ZERO);
    }

    #[test]
    fn capacity_is_clamped_to_handle_range() {
        assert_eq!(pool_capacity(usize::MAX), i32::MAX as usize);
        assert_eq!(pool_capacity(i32::MAX as usize + 1), i32::MAX as usize);
        assert_eq!(pool_capacity(16), 16);
        let (s, _) = scheduler(16);
        assert_eq!(s.capacity(), 16);
    }

    #[test]
    fn handler_can_chain_from_callback() {
        let (mut s, _) = scheduler(4);
        s.create(anim(1));
        s.create(anim(2));
        s.cleanup_owner(OwnerId(1), true);
        s.cleanup_owner(OwnerId(2), true);

        let mut chained = Vec::new();
        let delivered = s
            .dispatch_with(|sched, event| -> Result<(), ()> {
                let next = Animation::new(event.owner, event.target, 500, Easing::QuadOut)
                    .position(Vec2::ONE, Vec2::ZERO);
                chained.push(sched.create(next).ok_or(())?);
                Ok(())
            })
            .unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(chained.len(), 2);
        assert!(chained.iter().all(|&h| s.is_active(h)));
        assert_eq!(s.stats().total_callbacks, 2);
        assert_eq!(s.pending_completions(), 0);
    }

    #[test]
    fn events_queued_by_a_callback_are_delivered_in_the_same_drain() {
        let (mut s, _) = scheduler(4);
        s.create(anim(1));
        s.create(anim(2));
        s.cleanup_owner(OwnerId(1), true);

        let mut owners = Vec::new();
        s.dispatch_with(|sched, event| -> Result<(), ()> {
            owners.push(event.owner);
            sched.cleanup_owner(OwnerId(2), true);
            Ok(())
        })
        .unwrap();
        assert_eq!(owners, vec![OwnerId(1), OwnerId(2)]);
    }

    #[test]
    fn dispatch_error_keeps_the_rest_queued() {
        let (mut s, _) = scheduler(4);
        for owner in 1..=3 {
            s.create(anim(owner));
        }
        for owner in 1..=3 {
            s.cleanup_owner(OwnerId(owner), true);
        }

        let result = s.dispatch_with(|_, event| {
            if event.owner == OwnerId(2) {
                Err(event.owner)
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(OwnerId(2)));
        assert_eq!(s.pending_completions(), 1);
        assert_eq!(s.stats().total_callbacks, 2);

        let mut rest = Vec::new();
        assert_eq!(s.dispatch_completions(&mut rest), Ok(1));
        assert_eq!(rest[0].owner, OwnerId(3));
    }
}
