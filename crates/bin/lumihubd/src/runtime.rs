//! Daemon runtime — wiring and the cooperative loop.
//!
//! Everything runs on one thread: the loop alternates between operator
//! input and the reactor's next deadline, so timer callbacks, event
//! handlers and command dispatch never overlap.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::io::AsyncBufReadExt;

use lumihub_adapter_shell::{LiteralRenderer, ShellExecutor};
use lumihub_adapter_virtual::{LoggingExecutor, VirtualBacklight};
use lumihub_app::event_bus::EventBus;
use lumihub_app::ports::ScriptExecutor;
use lumihub_app::reactor::{SystemClock, TimerReactor};
use lumihub_app::router::CommandRouter;
use lumihub_app::sequencer::BacklightSequencer;
use lumihub_app::trigger::DebouncedTrigger;
use lumihub_domain::name::{EventName, InstanceName};
use lumihub_domain::script::ScriptTemplate;

use crate::commands::{self, ConsoleCommand};
use crate::config::Config;

type Reactor = TimerReactor<SystemClock>;
type HubTrigger = DebouncedTrigger<Rc<Reactor>, LiteralRenderer, Rc<dyn ScriptExecutor>>;
type HubSequencer = BacklightSequencer<Rc<Reactor>, Rc<VirtualBacklight>>;

/// How often the loop re-checks for work when nothing is scheduled.
const IDLE_RECHECK: Duration = Duration::from_secs(3600);

/// The fully wired daemon.
pub struct Runtime {
    reactor: Rc<Reactor>,
    bus: EventBus,
    router: CommandRouter,
    epoch: tokio::time::Instant,
    ready_event: EventName,
}

impl Runtime {
    /// Wire reactor, bus, router and every configured instance.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid instance definitions or a backlight
    /// referencing an LED that is not configured — configuration errors are
    /// fatal at construction.
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let clock = SystemClock::new();
        let epoch = tokio::time::Instant::from_std(clock.origin());
        let reactor = Rc::new(TimerReactor::new(clock));
        let bus = EventBus::new();
        let mut router = CommandRouter::new();

        let executor: Rc<dyn ScriptExecutor> = if config.script.shell_enabled {
            Rc::new(ShellExecutor::new(config.script.shell.clone()))
        } else {
            Rc::new(LoggingExecutor)
        };

        let mut leds = std::collections::HashMap::new();
        for led in &config.leds {
            leds.insert(led.name.clone(), Rc::new(VirtualBacklight::new()));
        }

        for cfg in &config.triggers {
            let name = InstanceName::new(cfg.name.clone())?;
            let event = EventName::new(cfg.event.clone())?;
            let template = ScriptTemplate::new(cfg.name.clone(), cfg.script.clone())?;

            let handle = reactor.register();
            let trigger: Rc<RefCell<HubTrigger>> = Rc::new(RefCell::new(DebouncedTrigger::new(
                name.clone(),
                cfg.settings()?,
                Rc::clone(&reactor),
                handle,
                template,
                LiteralRenderer,
                Rc::clone(&executor),
            )));

            let for_timer = Rc::clone(&trigger);
            reactor.set_callback(
                handle,
                Box::new(move |now| for_timer.borrow_mut().on_timer_fire(now)),
            );
            let for_event = Rc::clone(&trigger);
            bus.subscribe(event.clone(), move |_| for_event.borrow_mut().on_event());
            router.register_trigger(name.clone(), trigger);
            tracing::info!(trigger = %name, event = %event, "trigger registered");
        }

        for cfg in &config.backlights {
            let name = InstanceName::new(cfg.name.clone())?;
            let led = leds.get(&cfg.led).ok_or_else(|| {
                anyhow::anyhow!("backlight {} references unknown led {}", cfg.name, cfg.led)
            })?;

            let handle = reactor.register();
            let sequencer: Rc<RefCell<HubSequencer>> =
                Rc::new(RefCell::new(BacklightSequencer::new(
                    name.clone(),
                    cfg.settings()?,
                    Rc::clone(&reactor),
                    handle,
                    Rc::clone(led),
                )));

            let for_timer = Rc::clone(&sequencer);
            reactor.set_callback(
                handle,
                Box::new(move |now| for_timer.borrow_mut().on_timer_fire(now)),
            );
            for event in &cfg.wake_on {
                let event = EventName::new(event.clone())?;
                let for_event = Rc::clone(&sequencer);
                bus.subscribe(event, move |_| for_event.borrow_mut().wake());
            }
            router.register_backlight(name.clone(), sequencer);
            tracing::info!(backlight = %name, led = %cfg.led, "backlight registered");
        }

        Ok(Self {
            reactor,
            bus,
            router,
            epoch,
            ready_event: EventName::new("hub:ready")?,
        })
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only for stdin failures; command errors are reported
    /// to the operator and the loop continues.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        self.bus.emit(&self.ready_event);

        loop {
            let wake_at = match self.reactor.next_deadline().time() {
                Some(t) => self.epoch + t.as_duration(),
                None => tokio::time::Instant::now() + IDLE_RECHECK,
            };

            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if self.handle_line(line.trim()) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                () = tokio::time::sleep_until(wake_at) => {
                    self.reactor.run_due();
                }
            }
        }

        tracing::info!("lumihubd shutting down");
        Ok(())
    }

    /// Handle one console line. Returns `true` when the daemon should quit.
    fn handle_line(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        match commands::parse_line(line) {
            Ok(ConsoleCommand::Help) => print!("{}", commands::help_text()),
            Ok(ConsoleCommand::Quit) => return true,
            Ok(ConsoleCommand::Emit(event)) => {
                let delivered = self.bus.emit(&event);
                println!("emitted {event} to {delivered} subscriber(s)");
            }
            Ok(ConsoleCommand::Dispatch(command)) => {
                if let Err(err) = self.router.dispatch(&command) {
                    tracing::warn!(%err, "command dispatch failed");
                    println!("error: {err}");
                }
            }
            Err(err) => println!("error: {err} (try `help`)"),
        }
        false
    }
}
