//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Per-mode durations and the long-break cycle
//! - Auto-chain flags
//! - Tick / chime sound toggles
//! - Appearance: font, colors, theme, panel shape, goal line, icons and
//!   background image
//!
//! Configuration is stored at `~/.config/pomowidget/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::data_dir;
use crate::appearance::Appearance;
use crate::error::{ConfigError, CoreError, Result};
use crate::sinks::SettingsStore;
use crate::timer::{
    AutoChain, Durations, SoundToggles, TimerSettings, DEFAULT_LONG_BREAK_INTERVAL,
};

/// Schedule-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_focus_duration")]
    pub focus_duration: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomowidget/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: ScheduleConfig,
    #[serde(default)]
    pub auto_chain: AutoChain,
    #[serde(default)]
    pub sounds: SoundToggles,
    #[serde(default)]
    pub appearance: Appearance,
}

// Default functions
fn default_focus_duration() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    DEFAULT_LONG_BREAK_INTERVAL
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            focus_duration: default_focus_duration(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .trim()
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        // Only made representable here; `sanitize` applies the real bounds.
                        serde_json::Value::Number(n.clamp(0, i64::from(u32::MAX)).into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!(error = %e, "config directory unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file gives defaults silently; an
    /// unreadable or corrupt one gives defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(mut cfg) => {
                cfg.sanitize();
                cfg
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Numeric values outside
    /// their valid range are clamped rather than rejected.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)
            .map_err(|e| CoreError::Config(ConfigError::ParseFailed(e.to_string())))?;
        self.sanitize();
        Ok(())
    }

    /// Clamp every timer value into range and repair broken appearance values.
    pub fn sanitize(&mut self) {
        let settings = self.timer_settings();
        self.apply_timer_settings(&settings);
        self.appearance.sanitize();
    }

    /// The engine-facing subset of this config, clamped.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            durations: Durations {
                focus: self.timer.focus_duration,
                short_break: self.timer.short_break,
                long_break: self.timer.long_break,
            },
            auto_chain: self.auto_chain,
            sounds: self.sounds,
            long_break_interval: self.timer.long_break_interval,
        }
        .sanitized()
    }

    pub fn apply_timer_settings(&mut self, settings: &TimerSettings) {
        let settings = settings.sanitized();
        self.timer = ScheduleConfig {
            focus_duration: settings.durations.focus,
            short_break: settings.durations.short_break,
            long_break: settings.durations.long_break,
            long_break_interval: settings.long_break_interval,
        };
        self.auto_chain = settings.auto_chain;
        self.sounds = settings.sounds;
    }
}

/// [`SettingsStore`] backed by the TOML config file.
///
/// Persisting rewrites only the timer sections and keeps appearance intact.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default config location.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for ConfigStore {
    fn load(&self) -> TimerSettings {
        Config::load_from(&self.path).timer_settings()
    }

    fn persist(&mut self, settings: &TimerSettings) -> Result<()> {
        let mut cfg = Config::load_from(&self.path);
        cfg.apply_timer_settings(settings);
        cfg.save_to(&self.path)?;
        debug!(path = %self.path.display(), "settings persisted");
        Ok(())
    }
}
