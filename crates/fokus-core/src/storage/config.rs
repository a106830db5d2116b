//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Focus duration preset (or a custom length)
//! - Break lengths and long-break cadence
//! - Which signals fire and how cues sound
//!
//! Configuration is stored at `~/.config/fokus/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::audio::CueStyle;
use crate::error::ConfigError;
use crate::timer::{IntervalMode, SignalPolicy, TimerSettings};

/// Focus length presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 25:00
    #[default]
    Pomodoro,
    /// 10:00
    Short,
    /// 45:00
    Long,
    /// `custom_minutes:custom_seconds`
    Custom,
}

/// Phase lengths and cycling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default = "default_custom_minutes")]
    pub custom_minutes: u32,
    #[serde(default)]
    pub custom_seconds: u32,
    /// Minutes.
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    /// Minutes.
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u32,
    #[serde(default)]
    pub auto_start_next: bool,
    #[serde(default)]
    pub description: String,
}

/// Cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalsConfig {
    #[serde(default = "default_true")]
    pub halfway: bool,
    #[serde(default)]
    pub style: CueStyle,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub interval: IntervalMode,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fokus/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
}

fn default_custom_minutes() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_long_break_every() -> u32 {
    4
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f64 {
    0.5
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            custom_minutes: default_custom_minutes(),
            custom_seconds: 0,
            short_break: default_short_break(),
            long_break: default_long_break(),
            long_break_every: default_long_break_every(),
            auto_start_next: false,
            description: String::new(),
        }
    }
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            halfway: true,
            style: CueStyle::default(),
            volume: default_volume(),
            interval: IntervalMode::None,
        }
    }
}

impl TimerConfig {
    /// Focus length in seconds for the selected preset.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom length is outside 1..=240 minutes or
    /// 0..=59 seconds.
    pub fn focus_secs(&self) -> Result<f64, ConfigError> {
        let minutes = match self.preset {
            Preset::Pomodoro => 25,
            Preset::Short => 10,
            Preset::Long => 45,
            Preset::Custom => {
                if !(1..=240).contains(&self.custom_minutes) {
                    return Err(ConfigError::invalid(
                        "timer.custom_minutes",
                        format!("{} is outside 1..=240", self.custom_minutes),
                    ));
                }
                if self.custom_seconds > 59 {
                    return Err(ConfigError::invalid(
                        "timer.custom_seconds",
                        format!("{} is outside 0..=59", self.custom_seconds),
                    ));
                }
                return Ok(f64::from(self.custom_minutes * 60 + self.custom_seconds));
            }
        };
        Ok(f64::from(minutes * 60))
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
        let bad = |message: String| ConfigError::invalid(key, message);

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| bad(e.to_string()))?,
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| bad(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| bad(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the defaults cannot
    /// be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
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

    /// Set a config value by key without saving.
    ///
    /// The result must still produce valid timer settings, so a value that
    /// parses but cannot be scheduled is rejected here.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)
            .map_err(|e| ConfigError::invalid(key, e.to_string()))?;
        updated.to_settings()?;
        *self = updated;
        Ok(())
    }

    /// Build the engine settings snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range.
    pub fn to_settings(&self) -> Result<TimerSettings, ConfigError> {
        let settings = TimerSettings {
            focus_secs: self.timer.focus_secs()?,
            short_break_secs: f64::from(self.timer.short_break) * 60.0,
            long_break_secs: f64::from(self.timer.long_break) * 60.0,
            long_break_every: self.timer.long_break_every,
            auto_start_next: self.timer.auto_start_next,
            signals: SignalPolicy {
                halfway: self.signals.halfway,
                interval: self.signals.interval,
            },
            style: self.signals.style,
            volume: self.signals.volume,
            description: self.timer.description.clone(),
        };
        settings.validate()?;
        Ok(settings)
    }
}
