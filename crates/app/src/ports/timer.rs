//! Timer port — monotonic time and single-shot reschedulable callbacks.

use std::rc::Rc;
use std::sync::Arc;

use lumihub_domain::time::{Deadline, MonotonicTime};

/// A source of monotonic time.
pub trait Clock {
    /// The current monotonic time.
    fn now(&self) -> MonotonicTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }
}

/// Opaque ownership token for one registered timer callback.
///
/// A handle is minted once per entity at registration and rescheduled — never
/// re-created — for the lifetime of that entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(usize);

impl TimerHandle {
    /// Wrap a slot index. Intended for timer-service implementations; state
    /// machines treat handles as opaque.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// The slot index behind this handle.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The timer service as seen by a scheduled entity: read the clock and move
/// its own single pending firing around.
///
/// Rescheduling replaces any pending firing (last-write-wins); rescheduling
/// to [`Deadline::Never`] parks the timer without deregistering it.
pub trait TimerService {
    /// The current monotonic time.
    fn now(&self) -> MonotonicTime;

    /// Replace the pending deadline of `handle`.
    fn reschedule(&self, handle: TimerHandle, deadline: Deadline);
}

impl<T: TimerService + ?Sized> TimerService for &T {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }

    fn reschedule(&self, handle: TimerHandle, deadline: Deadline) {
        (**self).reschedule(handle, deadline);
    }
}

impl<T: TimerService + ?Sized> TimerService for Rc<T> {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }

    fn reschedule(&self, handle: TimerHandle, deadline: Deadline) {
        (**self).reschedule(handle, deadline);
    }
}

impl<T: TimerService + ?Sized> TimerService for Arc<T> {
    fn now(&self) -> MonotonicTime {
        (**self).now()
    }

    fn reschedule(&self, handle: TimerHandle, deadline: Deadline) {
        (**self).reschedule(handle, deadline);
    }
}
