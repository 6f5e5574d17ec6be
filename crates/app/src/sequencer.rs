//! Backlight timeout sequencer — ON → DIM → OFF → WAIT output stepping.
//!
//! A wake signal restarts the sequence from ON regardless of the current
//! stage. Each stage applies its output on entry and holds for the
//! configured timeout before advancing; a zero timeout skips that stage on
//! the transition into it. The sequence parks in WAIT with the timer
//! stopped, leaving the peripheral at whatever level was applied last — the
//! all-zero output is only ever applied by entering the OFF stage.

use std::time::Duration;

use lumihub_domain::led::{LedLevel, LedLevels};
use lumihub_domain::name::InstanceName;
use lumihub_domain::time::{Deadline, MonotonicTime};

use crate::ports::{LedSink, TimerHandle, TimerService};
use crate::router::SequencerControl;

/// One stage of the output sequence. [`Stage::Wait`] is idle; only a wake
/// signal leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Wait,
    On,
    Dim,
    Off,
}

/// Tunables for one backlight instance.
#[derive(Debug, Clone, Copy)]
pub struct SequencerSettings {
    /// Outputs applied on entering ON and DIM.
    pub levels: LedLevels,
    /// How long the full level holds before dimming; zero skips DIM.
    pub timeout_dim: Duration,
    /// How long the dim level holds before shutting off; zero skips OFF.
    pub timeout_off: Duration,
}

/// Timeout-driven output sequencer over one LED sink.
///
/// `next` names the stage the pending timer firing will enter; it uniquely
/// determines the applied output, the following stage and its delay.
pub struct BacklightSequencer<T, L> {
    name: InstanceName,
    levels: LedLevels,
    timeout_dim: Duration,
    timeout_off: Duration,
    next: Stage,
    handle: TimerHandle,
    timer: T,
    led: L,
}

impl<T, L> BacklightSequencer<T, L>
where
    T: TimerService,
    L: LedSink,
{
    /// Create a sequencer around an already-registered timer handle,
    /// parked in WAIT.
    pub fn new(
        name: InstanceName,
        settings: SequencerSettings,
        timer: T,
        handle: TimerHandle,
        led: L,
    ) -> Self {
        Self {
            name,
            levels: settings.levels,
            timeout_dim: settings.timeout_dim,
            timeout_off: settings.timeout_off,
            next: Stage::Wait,
            handle,
            timer,
            led,
        }
    }

    /// The configured instance name.
    #[must_use]
    pub fn name(&self) -> &InstanceName {
        &self.name
    }

    /// The stage the pending firing will enter.
    #[must_use]
    pub fn next_stage(&self) -> Stage {
        self.next
    }

    /// Restart the sequence from ON, effective immediately. A wake received
    /// mid-sequence abandons the current stage.
    pub fn wake(&mut self) {
        tracing::info!(backlight = %self.name, "waking up backlight");
        self.next = Stage::On;
        let now = self.timer.now();
        self.timer.reschedule(self.handle, Deadline::At(now));
    }

    /// Timer callback: enter `next`, apply its output, and schedule the
    /// following stage per the timeout table.
    pub fn on_timer_fire(&mut self, now: MonotonicTime) -> Deadline {
        match self.next {
            Stage::On => {
                tracing::info!(backlight = %self.name, "applying full backlight level");
                self.led.apply(self.levels.full);
                if self.timeout_dim > Duration::ZERO {
                    self.next = Stage::Dim;
                    Deadline::At(now + self.timeout_dim)
                } else if self.timeout_off > Duration::ZERO {
                    self.next = Stage::Off;
                    Deadline::At(now + self.timeout_off)
                } else {
                    self.park()
                }
            }
            Stage::Dim => {
                tracing::info!(backlight = %self.name, "dimming backlight");
                self.led.apply(self.levels.dim);
                if self.timeout_off > Duration::ZERO {
                    self.next = Stage::Off;
                    Deadline::At(now + self.timeout_off)
                } else {
                    self.park()
                }
            }
            Stage::Off => {
                tracing::info!(backlight = %self.name, "shutting down backlight");
                self.led.apply(LedLevel::OFF);
                self.park()
            }
            Stage::Wait => Deadline::Never,
        }
    }

    fn park(&mut self) -> Deadline {
        self.next = Stage::Wait;
        Deadline::Never
    }
}

impl<T, L> SequencerControl for BacklightSequencer<T, L>
where
    T: TimerService,
    L: LedSink,
{
    fn wake(&mut self) {
        Self::wake(self);
    }
}
