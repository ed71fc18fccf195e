//! Deferred work driven by the frame loop.
//!
//! Nothing here owns a timer thread. Callers pass the current `Instant` in and
//! poll once per frame, asking [`DeferredSlot::deadline`] how long they may
//! sleep before the next poll is needed.

use std::time::{Duration, Instant};

struct Pending<T> {
    due: Instant,
    payload: T,
}

/// Holds at most one scheduled payload. Scheduling again replaces (and so
/// cancels) whatever was pending.
pub struct DeferredSlot<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for DeferredSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeferredSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) {
        self.pending = Some(Pending {
            due: now + delay,
            payload,
        });
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the payload if its due time has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if due {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }
}

/// Collapses a burst of triggers into one firing after `wait` of quiet.
pub struct Debouncer {
    wait: Duration,
    slot: DeferredSlot<()>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            slot: DeferredSlot::new(),
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.slot.schedule(now, self.wait, ());
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.slot.poll(now).is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.slot.deadline()
    }

    /// Drop a pending firing. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.slot.cancel().is_some()
    }
}
