//! # lumihubd — lumihub daemon
//!
//! Composition root that wires the timer reactor, event bus and configured
//! instances together and runs the daemon loop.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env var overrides)
//! - Initialize logging
//! - Construct the reactor, event bus and command router
//! - Construct trigger/backlight instances, injecting their sinks
//! - Read operator commands from stdin and drive the reactor
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod commands;
mod config;
mod runtime;

use config::Config;
use runtime::Runtime;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(
            &config.logging.filter,
        )?)
        .init();

    tracing::info!(
        triggers = config.triggers.len(),
        backlights = config.backlights.len(),
        shell_enabled = config.script.shell_enabled,
        "lumihubd starting"
    );

    let mut runtime = Runtime::build(&config)?;
    runtime.run().await
}
