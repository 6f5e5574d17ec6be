//! Event — a named, payload-free record of something that happened.
//!
//! Bus events carry no event-specific data; subscribers react to the name
//! alone. The id and wall-clock timestamp exist for logging and correlation.

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::name::EventName;
use crate::time::{self, Timestamp};

/// An immutable record of one bus emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: EventName,
    pub at: Timestamp,
}

impl Event {
    /// Create a new record stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(name: EventName) -> Self {
        Self {
            id: EventId::new(),
            name,
            at: time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_name(name: &str) -> EventName {
        EventName::new(name).unwrap()
    }

    #[test]
    fn should_stamp_fresh_id_and_timestamp() {
        let before = time::now();
        let event = Event::new(event_name("hub:ready"));
        assert_eq!(event.name.as_str(), "hub:ready");
        assert!(event.at >= before);
    }

    #[test]
    fn should_generate_distinct_ids_per_emission() {
        let a = Event::new(event_name("ui:wakeup"));
        let b = Event::new(event_name("ui:wakeup"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::new(event_name("print:complete"));
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
