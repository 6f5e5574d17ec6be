//! Name newtypes keying instances and bus events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_name {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a non-empty name.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyName`] when `name` is empty.
            pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
                let name = name.into();
                if name.is_empty() {
                    return Err(ValidationError::EmptyName);
                }
                Ok(Self(name))
            }

            /// View the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_name!(
    /// The configured name of a trigger or backlight instance. Commands are
    /// routed by this name.
    InstanceName
);

define_name!(
    /// The name of an internal bus event (e.g. `hub:ready`, `ui:wakeup`).
    EventName
);
