//! Command router — typed dispatch keyed by instance name.
//!
//! The routing table is built once at setup; the state machines never see a
//! string-matching concern. Textual command parsing (if any) belongs to the
//! adapter that faces the operator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lumihub_domain::command::{BacklightCommand, Command, TriggerCommand};
use lumihub_domain::error::{HubError, NotFoundError};
use lumihub_domain::name::InstanceName;

/// Control surface of a debounced trigger, as the router sees it.
pub trait TriggerControl {
    fn enable(&mut self);
    fn disable(&mut self);
    fn trigger_now(&mut self);
    fn cancel(&mut self);
}

/// Control surface of a backlight sequencer, as the router sees it.
pub trait SequencerControl {
    fn wake(&mut self);
}

/// A trigger shared between the router, the event bus and the reactor.
pub type SharedTrigger = Rc<RefCell<dyn TriggerControl>>;

/// A sequencer shared between the router, the event bus and the reactor.
pub type SharedSequencer = Rc<RefCell<dyn SequencerControl>>;

/// Routes typed commands to registered instances.
#[derive(Default)]
pub struct CommandRouter {
    triggers: HashMap<InstanceName, SharedTrigger>,
    backlights: HashMap<InstanceName, SharedSequencer>,
}

impl CommandRouter {
    /// Create an empty routing table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger under `name`. Registering the same name again
    /// replaces the previous entry; configuration validation rejects
    /// duplicates before wiring gets here.
    pub fn register_trigger(&mut self, name: InstanceName, trigger: SharedTrigger) {
        self.triggers.insert(name, trigger);
    }

    /// Register a backlight sequencer under `name`.
    pub fn register_backlight(&mut self, name: InstanceName, sequencer: SharedSequencer) {
        self.backlights.insert(name, sequencer);
    }

    /// Dispatch `command` to the instance it addresses.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no instance of the addressed kind
    /// is registered under that name.
    pub fn dispatch(&self, command: &Command) -> Result<(), HubError> {
        match command {
            Command::Trigger { name, command } => {
                let trigger = self.triggers.get(name).ok_or_else(|| NotFoundError {
                    entity: "trigger",
                    id: name.to_string(),
                })?;
                let mut trigger = trigger.borrow_mut();
                match command {
                    TriggerCommand::Enable => trigger.enable(),
                    TriggerCommand::Disable => trigger.disable(),
                    TriggerCommand::Trigger => trigger.trigger_now(),
                    TriggerCommand::Cancel => trigger.cancel(),
                }
            }
            Command::Backlight { name, command } => {
                let sequencer = self.backlights.get(name).ok_or_else(|| NotFoundError {
                    entity: "backlight",
                    id: name.to_string(),
                })?;
                let mut sequencer = sequencer.borrow_mut();
                match command {
                    BacklightCommand::Wake => sequencer.wake(),
                }
            }
        }
        Ok(())
    }

    /// Names of all registered triggers, unordered.
    #[must_use]
    pub fn trigger_names(&self) -> Vec<&InstanceName> {
        self.triggers.keys().collect()
    }

    /// Names of all registered backlights, unordered.
    #[must_use]
    pub fn backlight_names(&self) -> Vec<&InstanceName> {
        self.backlights.keys().collect()
    }
}
