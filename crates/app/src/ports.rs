//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the state machines
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod led;
pub mod script;
pub mod timer;

pub use led::LedSink;
pub use script::{ScriptExecutor, TemplateRenderer};
pub use timer::{Clock, TimerHandle, TimerService};
