//! Operator command parsing — stdin lines into typed commands.
//!
//! This is the only place command strings are matched; everything past the
//! parse is the typed [`Command`] surface routed by instance name.

use lumihub_domain::command::{BacklightCommand, Command, TriggerCommand};
use lumihub_domain::error::ValidationError;
use lumihub_domain::name::{EventName, InstanceName};

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Route a typed command to an instance.
    Dispatch(Command),
    /// Emit a named bus event.
    Emit(EventName),
    /// Show the command reference.
    Help,
    /// Shut the daemon down.
    Quit,
}

/// Command-line parse failures.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The line contained no tokens.
    #[error("empty command")]
    Empty,

    /// The verb is not part of the command surface.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The verb needs an argument that was not given.
    #[error("{command} requires a {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// More tokens than the verb accepts.
    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),

    /// The argument failed domain validation.
    #[error(transparent)]
    InvalidName(#[from] ValidationError),
}

/// Parse one console line.
///
/// # Errors
///
/// Returns a [`ParseError`] describing what was wrong with the line.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(ParseError::Empty)?;

    let command = match verb {
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "emit" => {
            let event = required(&mut tokens, "emit", "event")?;
            ConsoleCommand::Emit(EventName::new(event)?)
        }
        "trigger-enable" => trigger_command(&mut tokens, "trigger-enable", TriggerCommand::Enable)?,
        "trigger-disable" => {
            trigger_command(&mut tokens, "trigger-disable", TriggerCommand::Disable)?
        }
        "trigger-run" => trigger_command(&mut tokens, "trigger-run", TriggerCommand::Trigger)?,
        "trigger-cancel" => trigger_command(&mut tokens, "trigger-cancel", TriggerCommand::Cancel)?,
        "backlight-wake" => {
            let name = required(&mut tokens, "backlight-wake", "name")?;
            ConsoleCommand::Dispatch(Command::Backlight {
                name: InstanceName::new(name)?,
                command: BacklightCommand::Wake,
            })
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    if let Some(extra) = tokens.next() {
        return Err(ParseError::TrailingInput(extra.to_string()));
    }
    Ok(command)
}

fn trigger_command<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
    command: TriggerCommand,
) -> Result<ConsoleCommand, ParseError> {
    let name = required(tokens, verb, "name")?;
    Ok(ConsoleCommand::Dispatch(Command::Trigger {
        name: InstanceName::new(name)?,
        command,
    }))
}

fn required<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ParseError> {
    tokens
        .next()
        .ok_or(ParseError::MissingArgument { command, argument })
}

/// The operator-facing command reference.
#[must_use]
pub fn help_text() -> String {
    let mut text = String::from("commands:\n");
    for (usage, help) in [
        ("trigger-enable <name>", TriggerCommand::Enable.help()),
        ("trigger-disable <name>", TriggerCommand::Disable.help()),
        ("trigger-run <name>", TriggerCommand::Trigger.help()),
        ("trigger-cancel <name>", TriggerCommand::Cancel.help()),
        ("backlight-wake <name>", BacklightCommand::Wake.help()),
        ("emit <event>", "Emit a named internal event"),
        ("help", "Show this help"),
        ("quit", "Shut the daemon down"),
    ] {
        text.push_str(&format!("  {usage:<24} {help}\n"));
    }
    text
}
