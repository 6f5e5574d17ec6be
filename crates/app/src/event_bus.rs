//! In-process event bus — named-event callback subscriptions.
//!
//! Events carry no payload; subscribers react to the name alone. Emission
//! delivers synchronously on the loop thread. Handlers are taken out of the
//! table for the duration of a dispatch, so a handler may subscribe or emit
//! re-entrantly without panicking; a re-entrant emit of the *same* name sees
//! no handlers and is a no-op, and subscriptions made during a dispatch take
//! effect from the next emission.

use std::cell::RefCell;
use std::collections::HashMap;

use lumihub_domain::event::Event;
use lumihub_domain::name::EventName;

/// A subscriber callback. Receives the emission record; there is no
/// event-specific payload.
pub type EventHandler = Box<dyn FnMut(&Event)>;

/// In-process event bus with per-name subscriber lists.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<HashMap<EventName, Vec<EventHandler>>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to every future emission of `name`.
    pub fn subscribe(&self, name: EventName, handler: impl FnMut(&Event) + 'static) {
        self.subscribers
            .borrow_mut()
            .entry(name)
            .or_default()
            .push(Box::new(handler));
    }

    /// Emit `name`, invoking every current subscriber in subscription order.
    ///
    /// Emitting a name with no subscribers succeeds and delivers nothing.
    /// Returns the number of handlers invoked.
    pub fn emit(&self, name: &EventName) -> usize {
        let event = Event::new(name.clone());
        tracing::debug!(event = %event.name, id = %event.id, "emitting event");

        let taken = self.subscribers.borrow_mut().remove(name);
        let Some(mut handlers) = taken else {
            return 0;
        };
        for handler in &mut handlers {
            handler(&event);
        }
        let delivered = handlers.len();

        // Handlers subscribed while we were dispatching landed in a fresh
        // entry; keep them behind the originals.
        let mut subscribers = self.subscribers.borrow_mut();
        let slot = subscribers.entry(name.clone()).or_default();
        let added_during_dispatch = std::mem::take(slot);
        *slot = handlers;
        slot.extend(added_during_dispatch);

        delivered
    }

    /// Number of subscribers currently registered for `name`.
    #[must_use]
    pub fn subscriber_count(&self, name: &EventName) -> usize {
        self.subscribers
            .borrow()
            .get(name)
            .map_or(0, Vec::len)
    }
}
