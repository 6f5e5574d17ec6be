//! In-process cooperative timer service.
//!
//! One [`TimerReactor`] drains due callbacks on a single loop thread. Each
//! registered callback owns exactly one [`TimerHandle`]; rescheduling
//! replaces its pending deadline, and [`Deadline::Never`] parks it. A
//! callback runs to completion before the next is dispatched, and its return
//! value becomes the timer's next deadline — overriding any reschedule of the
//! same handle made while it was running, which matches the contract the
//! state machines are written against.

use std::cell::RefCell;

use lumihub_domain::time::{Deadline, MonotonicTime};

use crate::ports::{Clock, TimerHandle, TimerService};

/// A scheduled callback: invoked with the current monotonic time, returns
/// the deadline it wants next.
pub type TimerCallback = Box<dyn FnMut(MonotonicTime) -> Deadline>;

struct TimerSlot {
    deadline: Deadline,
    callback: Option<TimerCallback>,
}

/// Single-threaded timer reactor driving all scheduled entities.
///
/// Handles are never deregistered; entities live for the process lifetime
/// and park themselves with [`Deadline::Never`] instead.
pub struct TimerReactor<C> {
    clock: C,
    slots: RefCell<Vec<TimerSlot>>,
}

impl<C: Clock> TimerReactor<C> {
    /// Create a reactor reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Register a parked slot with no callback yet.
    ///
    /// Entities need their handle before the closure that drives them can be
    /// built; pair with [`set_callback`](Self::set_callback).
    pub fn register(&self) -> TimerHandle {
        let mut slots = self.slots.borrow_mut();
        slots.push(TimerSlot {
            deadline: Deadline::Never,
            callback: None,
        });
        TimerHandle::from_index(slots.len() - 1)
    }

    /// Register `callback`, parked until first rescheduled.
    pub fn register_callback(&self, callback: TimerCallback) -> TimerHandle {
        let handle = self.register();
        self.set_callback(handle, callback);
        handle
    }

    /// Attach the callback for a previously registered handle.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was not minted by this reactor.
    pub fn set_callback(&self, handle: TimerHandle, callback: TimerCallback) {
        self.slots.borrow_mut()[handle.index()].callback = Some(callback);
    }

    /// The pending deadline of one handle.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was not minted by this reactor.
    #[must_use]
    pub fn pending(&self, handle: TimerHandle) -> Deadline {
        self.slots.borrow()[handle.index()].deadline
    }

    /// The earliest pending deadline across all slots, or
    /// [`Deadline::Never`] when everything is parked.
    #[must_use]
    pub fn next_deadline(&self) -> Deadline {
        self.slots
            .borrow()
            .iter()
            .filter_map(|slot| slot.deadline.time())
            .min()
            .map_or(Deadline::Never, Deadline::At)
    }

    /// Dispatch every due callback, earliest deadline first, re-reading the
    /// clock between dispatches. A callback rescheduled to an already-due
    /// deadline (its own return value or a `wake` from another callback)
    /// runs within the same drain.
    ///
    /// Returns the number of callbacks dispatched.
    pub fn run_due(&self) -> usize {
        let mut dispatched = 0;
        loop {
            let now = self.clock.now();
            let due = {
                let slots = self.slots.borrow();
                slots
                    .iter()
                    .enumerate()
                    .filter_map(|(index, slot)| slot.deadline.time().map(|t| (t, index)))
                    .filter(|&(t, _)| t <= now)
                    .min()
                    .map(|(_, index)| index)
            };
            let Some(index) = due else { break };

            // Park the slot and take its callback out so the callback can
            // reschedule other handles (or emit events that do) without the
            // slot list being borrowed.
            let callback = {
                let mut slots = self.slots.borrow_mut();
                let slot = &mut slots[index];
                slot.deadline = Deadline::Never;
                slot.callback.take()
            };
            let Some(mut callback) = callback else {
                continue;
            };

            let next = callback(now);

            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[index];
            slot.callback = Some(callback);
            slot.deadline = next;
            dispatched += 1;
        }
        dispatched
    }
}

impl<C: Clock> TimerService for TimerReactor<C> {
    fn now(&self) -> MonotonicTime {
        self.clock.now()
    }

    fn reschedule(&self, handle: TimerHandle, deadline: Deadline) {
        self.slots.borrow_mut()[handle.index()].deadline = deadline;
    }
}

/// Monotonic wall-process clock backed by [`std::time::Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    /// Anchor the clock origin at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    /// The instant this clock reads as [`MonotonicTime::ZERO`].
    #[must_use]
    pub fn origin(&self) -> std::time::Instant {
        self.origin
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> MonotonicTime {
        MonotonicTime::from_duration(self.origin.elapsed())
    }
}
