//! Debounced event trigger — delayed, cooldown-guarded script runs.
//!
//! Reacts to one named internal event by scheduling its action `delay` after
//! the most recent event (last-write-wins: repeat events move the pending
//! firing instead of adding one — at most one firing is ever pending). When
//! the timer fires, the action runs only if more than `cooldown` has elapsed
//! since the last run; otherwise the firing is silently absorbed.

use std::time::Duration;

use lumihub_domain::error::HubError;
use lumihub_domain::name::InstanceName;
use lumihub_domain::script::ScriptTemplate;
use lumihub_domain::time::{Deadline, MonotonicTime};

use crate::ports::{ScriptExecutor, TemplateRenderer, TimerHandle, TimerService};
use crate::router::TriggerControl;

/// Tunables for one trigger instance.
#[derive(Debug, Clone, Copy)]
pub struct TriggerSettings {
    /// Time between event receipt and action execution.
    pub delay: Duration,
    /// Minimum elapsed time since the last run before another is allowed.
    pub cooldown: Duration,
    /// Whether incoming events schedule anything.
    pub enabled: bool,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            cooldown: Duration::ZERO,
            enabled: true,
        }
    }
}

/// Event-driven debounced action runner.
///
/// Owns one [`TimerHandle`] for its whole lifetime; all scheduling state
/// lives in the timer service as that handle's pending deadline.
pub struct DebouncedTrigger<T, R, X> {
    name: InstanceName,
    enabled: bool,
    delay: Duration,
    cooldown: Duration,
    // Initialized to the construction-time clock reading, so the first
    // cooldown window is measured against construction, not a real run.
    last_execution: MonotonicTime,
    handle: TimerHandle,
    timer: T,
    template: ScriptTemplate,
    renderer: R,
    executor: X,
}

impl<T, R, X> DebouncedTrigger<T, R, X>
where
    T: TimerService,
    R: TemplateRenderer,
    X: ScriptExecutor,
{
    /// Create a trigger around an already-registered timer handle.
    pub fn new(
        name: InstanceName,
        settings: TriggerSettings,
        timer: T,
        handle: TimerHandle,
        template: ScriptTemplate,
        renderer: R,
        executor: X,
    ) -> Self {
        let last_execution = timer.now();
        Self {
            name,
            enabled: settings.enabled,
            delay: settings.delay,
            cooldown: settings.cooldown,
            last_execution,
            handle,
            timer,
            template,
            renderer,
            executor,
        }
    }

    /// The configured instance name.
    #[must_use]
    pub fn name(&self) -> &InstanceName {
        &self.name
    }

    /// Whether incoming events currently schedule anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// React to the subscribed event: schedule the action at `now + delay`.
    /// No-op while disabled.
    pub fn on_event(&mut self) {
        if !self.enabled {
            return;
        }
        self.schedule();
    }

    /// Manually schedule the action, bypassing the enabled gate but not the
    /// configured delay.
    pub fn trigger_now(&mut self) {
        self.schedule();
    }

    /// Allow events to schedule the action again. Schedules nothing itself.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop reacting to events and cancel any pending firing.
    pub fn disable(&mut self) {
        self.timer.reschedule(self.handle, Deadline::Never);
        self.enabled = false;
    }

    /// Cancel any pending firing without changing the enabled state.
    pub fn cancel(&mut self) {
        self.timer.reschedule(self.handle, Deadline::Never);
    }

    /// Timer callback: run the action once unless inside the cooldown
    /// window. Returns [`Deadline::Never`] — the trigger stays unscheduled
    /// until the next event.
    ///
    /// Action failures are logged and counted as completed runs: the
    /// cooldown clock restarts either way, and the next event schedules
    /// normally.
    pub fn on_timer_fire(&mut self, now: MonotonicTime) -> Deadline {
        if now.duration_since(self.last_execution) > self.cooldown {
            if let Err(err) = self.run_action() {
                tracing::error!(%err, trigger = %self.name, "failed to run trigger action");
            }
            self.last_execution = now;
        } else {
            tracing::debug!(trigger = %self.name, "firing absorbed by cooldown");
        }
        Deadline::Never
    }

    fn schedule(&mut self) {
        let at = self.timer.now() + self.delay;
        self.timer.reschedule(self.handle, Deadline::At(at));
    }

    fn run_action(&self) -> Result<(), HubError> {
        let script = self.renderer.render(&self.template)?;
        self.executor.execute(&script)
    }
}

impl<T, R, X> TriggerControl for DebouncedTrigger<T, R, X>
where
    T: TimerService,
    R: TemplateRenderer,
    X: ScriptExecutor,
{
    fn enable(&mut self) {
        Self::enable(self);
    }

    fn disable(&mut self) {
        Self::disable(self);
    }

    fn trigger_now(&mut self) {
        Self::trigger_now(self);
    }

    fn cancel(&mut self) {
        Self::cancel(self);
    }
}
