//! End-to-end tests for the full lumihub stack.
//!
//! Each test wires the real pieces together — virtual clock, timer reactor,
//! event bus, command router, trigger and sequencer instances over the
//! virtual adapter — and drives time by hand. No tokio, no stdin: the same
//! wiring the daemon does, minus the outer loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use lumihub_adapter_shell::LiteralRenderer;
use lumihub_adapter_virtual::{RecordingExecutor, VirtualBacklight, VirtualClock};
use lumihub_app::event_bus::EventBus;
use lumihub_app::reactor::TimerReactor;
use lumihub_app::router::CommandRouter;
use lumihub_app::sequencer::{BacklightSequencer, SequencerSettings};
use lumihub_app::trigger::{DebouncedTrigger, TriggerSettings};
use lumihub_domain::command::{BacklightCommand, Command, TriggerCommand};
use lumihub_domain::led::{LedLevel, LedLevels};
use lumihub_domain::name::{EventName, InstanceName};
use lumihub_domain::script::ScriptTemplate;
use lumihub_domain::time::Deadline;

type Reactor = TimerReactor<Rc<VirtualClock>>;
type HubTrigger = DebouncedTrigger<Rc<Reactor>, LiteralRenderer, Rc<RecordingExecutor>>;
type HubSequencer = BacklightSequencer<Rc<Reactor>, Rc<VirtualBacklight>>;

const TRIGGER_EVENT: &str = "print:complete";
const WAKE_EVENT: &str = "ui:wakeup";

struct Hub {
    clock: Rc<VirtualClock>,
    reactor: Rc<Reactor>,
    bus: EventBus,
    router: CommandRouter,
    executor: Rc<RecordingExecutor>,
    led: Rc<VirtualBacklight>,
}

impl Hub {
    /// Wire one trigger (`filter_timer` on `print:complete`) and one
    /// backlight (`lcd`, woken by `ui:wakeup`), exactly as the daemon does.
    fn build(trigger_settings: TriggerSettings, sequencer_settings: SequencerSettings) -> Self {
        let clock = Rc::new(VirtualClock::new());
        let reactor = Rc::new(TimerReactor::new(Rc::clone(&clock)));
        let bus = EventBus::new();
        let mut router = CommandRouter::new();
        let executor = Rc::new(RecordingExecutor::new());
        let led = Rc::new(VirtualBacklight::new());

        let handle = reactor.register();
        let trigger: Rc<RefCell<HubTrigger>> = Rc::new(RefCell::new(DebouncedTrigger::new(
            InstanceName::new("filter_timer").unwrap(),
            trigger_settings,
            Rc::clone(&reactor),
            handle,
            ScriptTemplate::new("filter_timer", "echo maintenance due").unwrap(),
            LiteralRenderer,
            Rc::clone(&executor),
        )));
        let for_timer = Rc::clone(&trigger);
        reactor.set_callback(
            handle,
            Box::new(move |now| for_timer.borrow_mut().on_timer_fire(now)),
        );
        let for_event = Rc::clone(&trigger);
        bus.subscribe(EventName::new(TRIGGER_EVENT).unwrap(), move |_| {
            for_event.borrow_mut().on_event();
        });
        router.register_trigger(InstanceName::new("filter_timer").unwrap(), trigger);

        let handle = reactor.register();
        let sequencer: Rc<RefCell<HubSequencer>> = Rc::new(RefCell::new(BacklightSequencer::new(
            InstanceName::new("lcd").unwrap(),
            sequencer_settings,
            Rc::clone(&reactor),
            handle,
            Rc::clone(&led),
        )));
        let for_timer = Rc::clone(&sequencer);
        reactor.set_callback(
            handle,
            Box::new(move |now| for_timer.borrow_mut().on_timer_fire(now)),
        );
        let for_event = Rc::clone(&sequencer);
        bus.subscribe(EventName::new(WAKE_EVENT).unwrap(), move |_| {
            for_event.borrow_mut().wake();
        });
        router.register_backlight(InstanceName::new("lcd").unwrap(), sequencer);

        Self {
            clock,
            reactor,
            bus,
            router,
            executor,
            led,
        }
    }

    fn emit(&self, name: &str) {
        self.bus.emit(&EventName::new(name).unwrap());
    }

    fn dispatch(&self, command: Command) {
        self.router.dispatch(&command).unwrap();
    }

    fn advance_and_drain(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
        self.reactor.run_due();
    }
}

fn trigger_settings(delay: u64, cooldown: u64) -> TriggerSettings {
    TriggerSettings {
        delay: Duration::from_secs(delay),
        cooldown: Duration::from_secs(cooldown),
        enabled: true,
    }
}

fn sequencer_settings(timeout_dim: u64, timeout_off: u64) -> SequencerSettings {
    SequencerSettings {
        levels: LedLevels {
            full: LedLevel::new(1.0, 0.9, 0.8, 0.0).unwrap(),
            dim: LedLevel::new(0.2, 0.2, 0.2, 0.0).unwrap(),
        },
        timeout_dim: Duration::from_secs(timeout_dim),
        timeout_off: Duration::from_secs(timeout_off),
    }
}

fn trigger_command(command: TriggerCommand) -> Command {
    Command::Trigger {
        name: InstanceName::new("filter_timer").unwrap(),
        command,
    }
}

fn wake_command() -> Command {
    Command::Backlight {
        name: InstanceName::new("lcd").unwrap(),
        command: BacklightCommand::Wake,
    }
}

// ---------------------------------------------------------------------------
// Trigger path
// ---------------------------------------------------------------------------

#[test]
fn should_run_trigger_action_delay_after_event() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 60));

    // get clear of the construction-time cooldown window first
    hub.advance_and_drain(100);
    hub.emit(TRIGGER_EVENT);
    hub.reactor.run_due();
    assert_eq!(hub.executor.run_count(), 0);

    hub.advance_and_drain(5);
    assert_eq!(hub.executor.scripts(), vec!["echo maintenance due".to_string()]);
    assert_eq!(hub.reactor.next_deadline(), Deadline::Never);
}

#[test]
fn should_absorb_firings_inside_cooldown_and_recover_after() {
    // events at t=100, 106, 120 with delay=5, cooldown=10: the action runs
    // at t=105 and t=125 only
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 60));

    hub.advance_and_drain(100);
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(5);
    assert_eq!(hub.executor.run_count(), 1);

    hub.advance_and_drain(1); // t=106
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(5); // t=111, 6s since last run: absorbed
    assert_eq!(hub.executor.run_count(), 1);

    hub.advance_and_drain(9); // t=120
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(5); // t=125, 20s since last run
    assert_eq!(hub.executor.run_count(), 2);
}

#[test]
fn should_collapse_repeat_events_into_one_firing() {
    let hub = Hub::build(trigger_settings(5, 0), sequencer_settings(30, 60));

    hub.advance_and_drain(100);
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(2);
    hub.emit(TRIGGER_EVENT); // moves the pending firing to t=107

    hub.advance_and_drain(3); // t=105: original deadline, nothing fires
    assert_eq!(hub.executor.run_count(), 0);

    hub.advance_and_drain(2); // t=107
    assert_eq!(hub.executor.run_count(), 1);
}

#[test]
fn should_ignore_events_while_disabled_and_resume_after_enable() {
    let hub = Hub::build(trigger_settings(5, 0), sequencer_settings(30, 60));
    hub.advance_and_drain(100);

    hub.dispatch(trigger_command(TriggerCommand::Disable));
    hub.emit(TRIGGER_EVENT);
    assert_eq!(hub.reactor.next_deadline(), Deadline::Never);
    hub.advance_and_drain(10);
    assert_eq!(hub.executor.run_count(), 0);

    hub.dispatch(trigger_command(TriggerCommand::Enable));
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(5);
    assert_eq!(hub.executor.run_count(), 1);
}

#[test]
fn should_cancel_pending_firing_on_command() {
    let hub = Hub::build(trigger_settings(5, 0), sequencer_settings(30, 60));
    hub.advance_and_drain(100);

    hub.emit(TRIGGER_EVENT);
    hub.dispatch(trigger_command(TriggerCommand::Cancel));
    hub.advance_and_drain(10);
    assert_eq!(hub.executor.run_count(), 0);

    // cancel does not disable: the next event schedules normally
    hub.emit(TRIGGER_EVENT);
    hub.advance_and_drain(5);
    assert_eq!(hub.executor.run_count(), 1);
}

#[test]
fn should_schedule_manual_trigger_while_disabled() {
    let hub = Hub::build(trigger_settings(5, 0), sequencer_settings(30, 60));
    hub.advance_and_drain(100);

    hub.dispatch(trigger_command(TriggerCommand::Disable));
    hub.dispatch(trigger_command(TriggerCommand::Trigger));
    hub.advance_and_drain(5);
    assert_eq!(hub.executor.run_count(), 1);
}

#[test]
fn should_keep_firing_after_a_failing_action() {
    let hub = Hub::build(trigger_settings(0, 10), sequencer_settings(30, 60));
    hub.advance_and_drain(100);

    hub.executor.fail_with("script exploded");
    hub.emit(TRIGGER_EVENT);
    hub.reactor.run_due();
    assert_eq!(hub.executor.run_count(), 1);

    // the failed run still restarted the cooldown clock
    hub.executor.succeed();
    hub.advance_and_drain(11);
    hub.emit(TRIGGER_EVENT);
    hub.reactor.run_due();
    assert_eq!(hub.executor.run_count(), 2);
}

// ---------------------------------------------------------------------------
// Backlight path
// ---------------------------------------------------------------------------

#[test]
fn should_step_backlight_through_full_dim_off_on_wake_command() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 60));
    let full = sequencer_settings(30, 60).levels.full;
    let dim = sequencer_settings(30, 60).levels.dim;

    hub.dispatch(wake_command());
    hub.reactor.run_due();
    assert_eq!(hub.led.applied(), vec![full]);

    hub.advance_and_drain(30);
    assert_eq!(hub.led.applied(), vec![full, dim]);

    hub.advance_and_drain(60);
    assert_eq!(hub.led.applied(), vec![full, dim, LedLevel::OFF]);
    assert_eq!(hub.reactor.next_deadline(), Deadline::Never);
}

#[test]
fn should_wake_backlight_from_bus_event() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(0, 0));

    hub.emit(WAKE_EVENT);
    hub.reactor.run_due();

    // both timeouts zero: the full level is applied once and the sequence
    // parks without ever applying the all-zero output
    assert_eq!(hub.led.applied().len(), 1);
    assert_eq!(hub.reactor.next_deadline(), Deadline::Never);
}

#[test]
fn should_restart_sequence_when_woken_mid_dim() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 60));
    let full = sequencer_settings(30, 60).levels.full;
    let dim = sequencer_settings(30, 60).levels.dim;

    hub.dispatch(wake_command());
    hub.reactor.run_due();
    hub.advance_and_drain(30); // now showing dim, OFF pending at t=90

    hub.emit(WAKE_EVENT);
    hub.reactor.run_due(); // restart applies full immediately
    assert_eq!(hub.led.applied(), vec![full, dim, full]);

    // the old OFF deadline is gone; dim arrives a full timeout_dim later
    hub.advance_and_drain(30);
    assert_eq!(hub.led.applied(), vec![full, dim, full, dim]);
}

#[test]
fn should_leave_dim_applied_when_timeout_off_is_zero() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 0));
    let dim = sequencer_settings(30, 0).levels.dim;

    hub.dispatch(wake_command());
    hub.reactor.run_due();
    hub.advance_and_drain(30);

    assert_eq!(hub.led.last_applied(), Some(dim));
    assert_eq!(hub.reactor.next_deadline(), Deadline::Never);
}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

#[test]
fn should_report_not_found_for_unknown_instance() {
    let hub = Hub::build(trigger_settings(5, 10), sequencer_settings(30, 60));
    let result = hub.router.dispatch(&Command::Trigger {
        name: InstanceName::new("ghost").unwrap(),
        command: TriggerCommand::Enable,
    });
    assert!(matches!(
        result,
        Err(lumihub_domain::error::HubError::NotFound(_))
    ));
}
