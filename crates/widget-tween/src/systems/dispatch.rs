//! Completion queue filled by ticks and cleanup, drained by the dispatcher.

use std::collections::VecDeque;
use crate::api::types::CompletionEvent;

/// FIFO of pending completion events.
///
/// The dispatcher pops one event at a time and holds no borrow of the queue
/// while the callback runs, so events queued by the callback itself (for
/// example through a cleanup with callbacks) are delivered in the same drain.
pub(crate) struct CompletionQueue {
    events: VecDeque<CompletionEvent>,
}

impl CompletionQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { events: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, event: CompletionEvent) {
        self.events.push_back(event);
    }

    /// Oldest pending event, removed from the queue.
    pub fn pop(&mut self) -> Option<CompletionEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
