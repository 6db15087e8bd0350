use std::fmt::Display;
use std::time::Duration;
use log::error;
use widget_tween::{
    Clock, CompletionHandler, Directory, MonotonicClock, OwnerId, Scheduler, SchedulerConfig,
    TickAccumulator, TickReport,
};

/// Host loop that owns the scheduler and its collaborators.
///
/// Replaces a process-wide scheduler singleton: the host holds one runner
/// and routes ticks, disconnects and script calls through it. Completion
/// callbacks get the scheduler back, so they can chain animations.
pub struct SchedulerRunner<D, S, C = MonotonicClock>
where
    D: Directory,
    S: CompletionHandler<C>,
    C: Clock,
{
    scheduler: Scheduler<C>,
    directory: D,
    sink: S,
    timestep: TickAccumulator,
    /// Sink failures isolated since startup.
    sink_failures: u64,
}

impl<D, S> SchedulerRunner<D, S, MonotonicClock>
where
    D: Directory,
    S: CompletionHandler<MonotonicClock>,
    S::Error: Display,
{
    pub fn new(config: &SchedulerConfig, directory: D, sink: S) -> Self {
        Self::with_clock(config, MonotonicClock::new(), directory, sink)
    }
}

impl<D, S, C> SchedulerRunner<D, S, C>
where
    D: Directory,
    S: CompletionHandler<C>,
    S::Error: Display,
    C: Clock,
{
    pub fn with_clock(config: &SchedulerConfig, clock: C, directory: D, sink: S) -> Self {
        Self {
            scheduler: Scheduler::with_clock(config, clock),
            directory,
            sink,
            timestep: TickAccumulator::new(config.tick_interval()),
            sink_failures: 0,
        }
    }

    /// Feed elapsed host time. Runs as many ticks as are due, each one
    /// followed by a completion drain. Returns the number of ticks run.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        let steps = self.timestep.accumulate(frame);
        for _ in 0..steps {
            self.tick_once();
        }
        steps
    }

    /// Run one tick and deliver its completions.
    pub fn tick_once(&mut self) -> TickReport {
        let report = self.scheduler.tick(&mut self.directory);
        self.drain_completions();
        report
    }

    /// Deliver pending completions. A failing callback is logged and the
    /// drain continues with the next event, so one bad script handler
    /// cannot starve the others.
    pub fn drain_completions(&mut self) -> usize {
        let before = self.scheduler.stats().total_callbacks;
        while let Err(e) = self.scheduler.dispatch_to(&mut self.sink) {
            self.sink_failures += 1;
            error!("completion callback failed: {}", e);
        }
        (self.scheduler.stats().total_callbacks - before) as usize
    }

    /// The owner entity is gone: drop its animations without callbacks.
    pub fn owner_disconnected(&mut self, owner: OwnerId) -> usize {
        self.scheduler.cleanup_owner(owner, false)
    }

    pub fn scheduler(&self) -> &Scheduler<C> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<C> {
        &mut self.scheduler
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }

    /// Time until the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        self.timestep.until_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use widget_tween::{
        Animation, AnimationKind, CompletionEvent, Easing, ManualClock, MemoryDirectory,
        MemoryOwner, TargetId, Widget,
    };

    /// Fails on every even handle. Events of kind 1 chain a kind 2 follow-up.
    #[derive(Default)]
    struct PickySink {
        accepted: Vec<CompletionEvent>,
    }

    impl<C: Clock> CompletionHandler<C> for PickySink {
        type Error = String;

        fn on_complete(
            &mut self,
            scheduler: &mut Scheduler<C>,
            event: CompletionEvent,
        ) -> Result<(), String> {
            if event.handle.0 % 2 == 0 {
                return Err(format!("handle {} rejected", event.handle.0));
            }
            if event.kind == AnimationKind(1) {
                scheduler
                    .create(anim(100).with_kind(AnimationKind(2)))
                    .ok_or_else(|| "pool full".to_string())?;
            }
            self.accepted.push(event);
            Ok(())
        }
    }

    fn runner() -> (SchedulerRunner<MemoryDirectory, PickySink, ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let mut dir = MemoryDirectory::new();
        dir.connect(MemoryOwner::new(OwnerId(1)).with_widget(Widget::new(TargetId(1))));
        let runner = SchedulerRunner::with_clock(
            &SchedulerConfig::default(),
            clock.clone(),
            dir,
            PickySink::default(),
        );
        (runner, clock)
    }

    fn anim(duration_ms: i32) -> Animation {
        Animation::new(OwnerId(1), TargetId(1), duration_ms, Easing::Linear)
            .position(Vec2::ZERO, Vec2::ONE)
    }

    #[test]
    fn advance_runs_due_ticks() {
        let (mut r, clock) = runner();
        r.scheduler_mut().create(anim(1_000)).unwrap();
        clock.advance(70);
        assert_eq!(r.advance(Duration::from_millis(70)), 2);
        let w = r.directory().widget(OwnerId(1), TargetId(1)).unwrap();
        assert_eq!(w.commits, 2);
    }

    #[test]
    fn sink_failures_are_isolated() {
        let (mut r, _) = runner();
        for _ in 0..4 {
            r.scheduler_mut().create(anim(0)).unwrap();
        }
        r.tick_once();
        assert_eq!(r.sink().accepted.len(), 2);
        assert_eq!(r.sink_failures(), 2);
        assert_eq!(r.scheduler().pending_completions(), 0);
        assert_eq!(r.scheduler().stats().total_callbacks, 4);
    }

    #[test]
    fn disconnect_drops_without_callbacks() {
        let (mut r, _) = runner();
        r.scheduler_mut().create(anim(1_000)).unwrap();
        r.scheduler_mut().create(anim(1_000)).unwrap();
        assert_eq!(r.owner_disconnected(OwnerId(1)), 2);
        assert_eq!(r.scheduler().pending_completions(), 0);
        assert_eq!(r.tick_once().visited, 0);
    }

    #[test]
    fn callbacks_chain_follow_ups() {
        let (mut r, clock) = runner();
        // Handle 0 would be rejected; park it so the chained one gets an odd handle.
        let parked = r.scheduler_mut().create(anim(10_000)).unwrap();
        let first = r.scheduler_mut().create(anim(0).with_kind(AnimationKind(1))).unwrap();
        assert_eq!((parked.0, first.0), (0, 1));

        r.tick_once();
        assert_eq!(r.sink().accepted.len(), 1);
        assert_eq!(r.sink_failures(), 0);
        // parked + the follow-up; the follow-up reuses slot 1.
        assert_eq!(r.scheduler().active_count(), 2);
        assert!(r.scheduler().is_active(first));

        clock.advance(100);
        let report = r.tick_once();
        assert_eq!((report.visited, report.completed), (2, 1));
        let kinds: Vec<_> = r.sink().accepted.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![AnimationKind(1), AnimationKind(2)]);
    }
}
