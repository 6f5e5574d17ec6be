//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lumihub.toml` in the working directory (or the path named by
//! `LUMIHUB_CONFIG`). Every field has a default so the file is optional;
//! with no file at all the daemon runs a small demo setup. Environment
//! variables take precedence over file values.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use lumihub_app::sequencer::SequencerSettings;
use lumihub_app::trigger::TriggerSettings;
use lumihub_domain::led::{LedLevel, LedLevels};

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Script execution settings.
    pub script: ScriptConfig,
    /// LED peripherals backlights can reference.
    #[serde(rename = "led")]
    pub leds: Vec<LedConfig>,
    /// Debounced event trigger instances.
    #[serde(rename = "trigger")]
    pub triggers: Vec<TriggerConfig>,
    /// Backlight sequencer instances.
    #[serde(rename = "backlight")]
    pub backlights: Vec<BacklightConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Script execution configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Run trigger scripts through the shell. When false, scripts are only
    /// logged.
    pub shell_enabled: bool,
    /// Shell binary used when `shell_enabled` is set.
    pub shell: String,
}

/// One LED peripheral.
#[derive(Debug, Clone, Deserialize)]
pub struct LedConfig {
    /// Name backlights use to reference this peripheral.
    pub name: String,
}

/// One debounced trigger instance.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    /// Instance name, used for command routing.
    pub name: String,
    /// Bus event that schedules the action.
    pub event: String,
    /// Script template source to run.
    pub script: String,
    /// Seconds between event receipt and action execution.
    #[serde(default)]
    pub delay: f64,
    /// Minimum seconds since the last run before another is allowed.
    #[serde(default)]
    pub cooldown: f64,
    /// Whether events schedule anything until told otherwise.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// One backlight sequencer instance.
#[derive(Debug, Clone, Deserialize)]
pub struct BacklightConfig {
    /// Instance name, used for command routing.
    pub name: String,
    /// Name of the LED peripheral this backlight drives.
    pub led: String,
    /// Output applied on entering the ON stage.
    #[serde(default = "LevelConfig::full_white")]
    pub full: LevelConfig,
    /// Output applied on entering the DIM stage.
    #[serde(default)]
    pub dim: LevelConfig,
    /// Seconds the full level holds before dimming; zero skips DIM.
    #[serde(default)]
    pub timeout_dim: f64,
    /// Seconds the dim level holds before shutting off; zero skips OFF.
    #[serde(default)]
    pub timeout_off: f64,
    /// Bus events that wake this backlight.
    #[serde(default = "default_wake_on")]
    pub wake_on: Vec<String>,
}

/// One RGBW output in configuration form, validated into a domain
/// [`LedLevel`] during `validate`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub white: f32,
}

impl LevelConfig {
    fn full_white() -> Self {
        Self {
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            white: 0.0,
        }
    }

    fn to_level(self, context: &str) -> Result<LedLevel, ConfigError> {
        LedLevel::new(self.red, self.green, self.blue, self.white)
            .map_err(|err| ConfigError::Validation(format!("{context}: {err}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_wake_on() -> Vec<String> {
    vec!["hub:ready".to_string(), "ui:wakeup".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        // Demo setup: one virtual LED with a backlight on it, and one
        // trigger that reacts to the startup event.
        Self {
            logging: LoggingConfig::default(),
            script: ScriptConfig::default(),
            leds: vec![LedConfig {
                name: "lcd0".to_string(),
            }],
            triggers: vec![TriggerConfig {
                name: "heartbeat".to_string(),
                event: "hub:ready".to_string(),
                script: "echo lumihub is up".to_string(),
                delay: 0.0,
                cooldown: 0.0,
                enabled: true,
            }],
            backlights: vec![BacklightConfig {
                name: "lcd".to_string(),
                led: "lcd0".to_string(),
                full: LevelConfig::full_white(),
                dim: LevelConfig {
                    red: 0.2,
                    green: 0.2,
                    blue: 0.2,
                    white: 0.0,
                },
                timeout_dim: 30.0,
                timeout_off: 60.0,
                wake_on: default_wake_on(),
            }],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lumihubd=info,lumihub=info".to_string(),
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            shell_enabled: false,
            shell: lumihub_adapter_shell::DEFAULT_SHELL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `lumihub.toml` — or the path in
    /// `LUMIHUB_CONFIG` — then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if semantic
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("LUMIHUB_CONFIG").unwrap_or_else(|_| "lumihub.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LUMIHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("LUMIHUB_SHELL") {
            self.script.shell = val;
            self.script.shell_enabled = true;
        }
    }

    /// Check semantic invariants across the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty or duplicate names,
    /// negative or non-finite durations, out-of-range levels, and backlight
    /// references to LEDs that are not configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut led_names = HashSet::new();
        for led in &self.leds {
            require_name("led", &led.name)?;
            if !led_names.insert(led.name.as_str()) {
                return Err(duplicate("led", &led.name));
            }
        }

        let mut trigger_names = HashSet::new();
        for trigger in &self.triggers {
            require_name("trigger", &trigger.name)?;
            if !trigger_names.insert(trigger.name.as_str()) {
                return Err(duplicate("trigger", &trigger.name));
            }
            require_name("trigger event", &trigger.event)?;
            require_seconds(&trigger.name, "delay", trigger.delay)?;
            require_seconds(&trigger.name, "cooldown", trigger.cooldown)?;
        }

        let mut backlight_names = HashSet::new();
        for backlight in &self.backlights {
            require_name("backlight", &backlight.name)?;
            if !backlight_names.insert(backlight.name.as_str()) {
                return Err(duplicate("backlight", &backlight.name));
            }
            require_seconds(&backlight.name, "timeout_dim", backlight.timeout_dim)?;
            require_seconds(&backlight.name, "timeout_off", backlight.timeout_off)?;
            backlight
                .full
                .to_level(&format!("backlight {} full level", backlight.name))?;
            backlight
                .dim
                .to_level(&format!("backlight {} dim level", backlight.name))?;
            for event in &backlight.wake_on {
                require_name("backlight wake_on event", event)?;
            }
            if !led_names.contains(backlight.led.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "backlight {} references unknown led {}",
                    backlight.name, backlight.led
                )));
            }
        }
        Ok(())
    }
}

impl TriggerConfig {
    /// Convert to the state machine's settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for negative or non-finite
    /// durations.
    pub fn settings(&self) -> Result<TriggerSettings, ConfigError> {
        Ok(TriggerSettings {
            delay: seconds(&self.name, "delay", self.delay)?,
            cooldown: seconds(&self.name, "cooldown", self.cooldown)?,
            enabled: self.enabled,
        })
    }
}

impl BacklightConfig {
    /// Convert to the state machine's settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for out-of-range levels or bad
    /// durations.
    pub fn settings(&self) -> Result<SequencerSettings, ConfigError> {
        Ok(SequencerSettings {
            levels: LedLevels {
                full: self
                    .full
                    .to_level(&format!("backlight {} full level", self.name))?,
                dim: self
                    .dim
                    .to_level(&format!("backlight {} dim level", self.name))?,
            },
            timeout_dim: seconds(&self.name, "timeout_dim", self.timeout_dim)?,
            timeout_off: seconds(&self.name, "timeout_off", self.timeout_off)?,
        })
    }
}

fn require_name(kind: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    Ok(())
}

fn duplicate(kind: &str, name: &str) -> ConfigError {
    ConfigError::Validation(format!("duplicate {kind} name: {name}"))
}

fn require_seconds(instance: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    seconds(instance, field, value).map(|_| ())
}

fn seconds(instance: &str, field: &str, value: f64) -> Result<Duration, ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{instance}: {field} must be a non-negative number of seconds"
        )));
    }
    Ok(Duration::from_secs_f64(value))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
