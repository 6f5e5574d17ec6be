//! Typed control surface — commands routed to instances by name.
//!
//! The routing table is built once at setup; no string matching happens
//! past the edge that parses operator input.

use serde::{Deserialize, Serialize};

use crate::name::InstanceName;

/// Control commands accepted by a debounced trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCommand {
    /// Allow incoming events to schedule the action.
    Enable,
    /// Stop reacting to events and cancel any pending firing.
    Disable,
    /// Manually schedule the action as if the event had fired.
    Trigger,
    /// Cancel any pending firing without changing the enabled state.
    Cancel,
}

impl TriggerCommand {
    /// Operator-facing help text.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::Enable => "Enable execution of a trigger's action",
            Self::Disable => "Disable a trigger and cancel any pending action",
            Self::Trigger => "Manually schedule a trigger's action",
            Self::Cancel => "Cancel a trigger's pending action",
        }
    }
}

/// Control commands accepted by a backlight sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklightCommand {
    /// Restart the sequence from the ON stage.
    Wake,
}

impl BacklightCommand {
    /// Operator-facing help text.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::Wake => "Force wakeup of a backlight",
        }
    }
}

/// A command addressed to one named instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Command {
    /// Addressed to a debounced trigger.
    Trigger {
        name: InstanceName,
        command: TriggerCommand,
    },
    /// Addressed to a backlight sequencer.
    Backlight {
        name: InstanceName,
        command: BacklightCommand,
    },
}

impl Command {
    /// The instance this command is addressed to.
    #[must_use]
    pub fn instance(&self) -> &InstanceName {
        match self {
            Self::Trigger { name, .. } | Self::Backlight { name, .. } => name,
        }
    }

    /// Operator-facing help text for the inner command.
    #[must_use]
    pub fn help(&self) -> &'static str {
        match self {
            Self::Trigger { command, .. } => command.help(),
            Self::Backlight { command, .. } => command.help(),
        }
    }
}
