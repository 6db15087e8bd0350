//! Tick processor — advances every active animation, writes interpolated
//! properties, then commits each touched widget once.

use serde::Serialize;
use crate::api::traits::{Directory, Owner, Target};
use crate::core::pool::AnimationPool;
use crate::systems::batch::DirtyBatch;
use crate::systems::dispatch::CompletionQueue;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickReport {
    /// Active handles visited.
    pub visited: usize,
    /// Animations that reached progress 1 (silent ones included).
    pub completed: usize,
    /// Animations dropped because their owner or widget no longer resolves.
    pub cancelled: usize,
    /// `commit()` calls issued.
    pub commits: usize,
}

/// Run one tick against `now_ms`.
///
/// Phase 1 writes properties and fills the dirty batch and completion queue.
/// Phase 2 commits every dirty widget exactly once. Completion events are
/// only queued here; nothing is delivered until the caller drains the queue.
pub(crate) fn run<D: Directory>(
    pool: &mut AnimationPool,
    batch: &mut DirtyBatch,
    completions: &mut CompletionQueue,
    directory: &mut D,
    now_ms: u64,
) -> TickReport {
    let mut report = TickReport::default();
    batch.clear();

    // Releasing at `i` swaps an unvisited handle into `i`, so only advance
    // when the current handle survives.
    let mut i = 0;
    while let Some(handle) = pool.active_handle(i) {
        report.visited += 1;
        let slot = pool.slot(handle);

        if !slot.active {
            pool.release_at(i);
            continue;
        }

        let widget = directory
            .resolve_owner(slot.owner)
            .and_then(|owner| owner.resolve_target(slot.target));
        let Some(widget) = widget else {
            // Vanished owner or widget: cancel without notification.
            report.cancelled += 1;
            pool.release_at(i);
            continue;
        };

        let t = slot.progress(now_ms);
        slot.apply(slot.easing.apply(t), widget);
        batch.mark(slot.owner, slot.target);

        if t >= 1.0 {
            if !slot.silent {
                completions.push(slot.completion_event(handle));
            }
            report.completed += 1;
            pool.release_at(i);
        } else {
            i += 1;
        }
    }

    for (owner_id, targets) in batch.iter() {
        let Some(owner) = directory.resolve_owner(owner_id) else {
            continue;
        };
        for &target_id in targets {
            if let Some(widget) = owner.resolve_target(target_id) {
                widget.commit();
                report.commits += 1;
            }
        }
    }

    report
}
