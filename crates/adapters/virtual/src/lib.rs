//! # lumihub-adapter-virtual
//!
//! Virtual/demo adapter that provides simulated collaborators for testing
//! and demonstration purposes.
//!
//! ## Provided pieces
//!
//! | Piece | Port | Behaviour |
//! |-------|------|-----------|
//! | [`VirtualClock`] | `Clock` | Manually advanced monotonic time |
//! | [`VirtualBacklight`] | `LedSink` | Records every applied level |
//! | [`RecordingExecutor`] | `ScriptExecutor` | Records scripts, optional injected failure |
//! | [`LoggingExecutor`] | `ScriptExecutor` | Logs the script instead of running it |
//!
//! ## Dependency rule
//!
//! Depends on `lumihub-app` (port traits) and `lumihub-domain` only.

use std::sync::Mutex;
use std::time::Duration;

use lumihub_app::ports::{Clock, LedSink, ScriptExecutor};
use lumihub_domain::error::HubError;
use lumihub_domain::led::LedLevel;
use lumihub_domain::time::MonotonicTime;

/// A manually advanced monotonic clock.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Mutex<MonotonicTime>,
}

impl VirtualClock {
    /// Create a clock reading [`MonotonicTime::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.lock_now();
        *now = *now + by;
    }

    /// Jump the clock to an absolute reading.
    pub fn set(&self, now: MonotonicTime) {
        *self.lock_now() = now;
    }

    fn lock_now(&self) -> std::sync::MutexGuard<'_, MonotonicTime> {
        self.now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> MonotonicTime {
        *self.lock_now()
    }
}

/// A simulated LED backlight that records every applied level.
#[derive(Debug, Default)]
pub struct VirtualBacklight {
    applied: Mutex<Vec<LedLevel>>,
}

impl VirtualBacklight {
    /// Create a backlight with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level applied so far, oldest first.
    #[must_use]
    pub fn applied(&self) -> Vec<LedLevel> {
        self.lock_applied().clone()
    }

    /// The most recently applied level, if any.
    #[must_use]
    pub fn last_applied(&self) -> Option<LedLevel> {
        self.lock_applied().last().copied()
    }

    /// Forget the recorded history.
    pub fn clear(&self) {
        self.lock_applied().clear();
    }

    fn lock_applied(&self) -> std::sync::MutexGuard<'_, Vec<LedLevel>> {
        self.applied
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LedSink for VirtualBacklight {
    fn apply(&self, level: LedLevel) {
        tracing::debug!(?level, "virtual backlight level applied");
        self.lock_applied().push(level);
    }
}

/// A script executor that records what it is asked to run.
///
/// An injected failure message makes every subsequent execution fail until
/// cleared, while still recording the script — mirroring the contract that a
/// failed action still counts as an attempt.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    scripts: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl RecordingExecutor {
    /// Create an executor that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every script received so far, oldest first.
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        self.lock_scripts().clone()
    }

    /// Number of scripts received so far.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.lock_scripts().len()
    }

    /// Make every subsequent execution fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.lock_failure() = Some(message.into());
    }

    /// Make subsequent executions succeed again.
    pub fn succeed(&self) {
        *self.lock_failure() = None;
    }

    fn lock_scripts(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.scripts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ScriptExecutor for RecordingExecutor {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        self.lock_scripts().push(script.to_string());
        match self.lock_failure().as_deref() {
            Some(message) => Err(HubError::Script(message.to_string().into())),
            None => Ok(()),
        }
    }
}

/// A script executor that logs instead of running anything.
///
/// The daemon uses it when shell execution is disabled, so a demo
/// configuration is safe by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingExecutor;

impl ScriptExecutor for LoggingExecutor {
    fn execute(&self, script: &str) -> Result<(), HubError> {
        tracing::info!(script, "script execution is disabled; logging only");
        Ok(())
    }
}
