use serde::{Deserialize, Serialize};

use crate::audio::CueStyle;
use crate::error::ConfigError;

/// How periodic tick cues are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum IntervalMode {
    #[default]
    None,
    /// One tick every `seconds`.
    Fixed { seconds: f64 },
    /// One tick per measure; every fourth tick is a downbeat.
    Rhythmic { measure: f64 },
}

impl IntervalMode {
    /// Cursor advance after a tick, `None` when ticks are disabled.
    pub fn step(&self) -> Option<f64> {
        match *self {
            IntervalMode::None => None,
            IntervalMode::Fixed { seconds } => Some(seconds),
            IntervalMode::Rhythmic { measure } => Some(measure),
        }
    }

    pub fn is_rhythmic(&self) -> bool {
        matches!(self, IntervalMode::Rhythmic { .. })
    }
}

/// Which signals the scheduler is allowed to raise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPolicy {
    pub halfway: bool,
    pub interval: IntervalMode,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            halfway: true,
            interval: IntervalMode::None,
        }
    }
}

/// Validated snapshot of everything the engine needs for a phase.
///
/// Built from [`crate::storage::Config`] or directly by callers. The engine
/// only accepts it through [`TimerSettings::validate`], so the scheduler never
/// sees a non-positive duration or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_secs: f64,
    pub short_break_secs: f64,
    pub long_break_secs: f64,
    pub long_break_every: u32,
    pub auto_start_next: bool,
    pub signals: SignalPolicy,
    pub style: CueStyle,
    /// Output gain in `0.0..=1.0`.
    pub volume: f64,
    pub description: String,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_secs: 25.0 * 60.0,
            short_break_secs: 5.0 * 60.0,
            long_break_secs: 15.0 * 60.0,
            long_break_every: 4,
            auto_start_next: false,
            signals: SignalPolicy::default(),
            style: CueStyle::default(),
            volume: 0.5,
            description: String::new(),
        }
    }
}

impl TimerSettings {
    /// Reject values the engine cannot schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("focus_secs", self.focus_secs)?;
        positive("short_break_secs", self.short_break_secs)?;
        positive("long_break_secs", self.long_break_secs)?;
        if self.long_break_every == 0 {
            return Err(ConfigError::invalid(
                "long_break_every",
                "must be at least 1",
            ));
        }
        if let Some(step) = self.signals.interval.step() {
            positive("interval", step)?;
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::invalid(
                "volume",
                format!("{} is outside 0.0..=1.0", self.volume),
            ));
        }
        Ok(())
    }

    /// Break length after the `session_index`-th completed focus phase.
    pub fn break_secs_after(&self, session_index: u32) -> f64 {
        if self.long_break_every > 0 && session_index % self.long_break_every == 0 {
            self.long_break_secs
        } else {
            self.short_break_secs
        }
    }

    /// Where the interval cursor starts for a fresh phase.
    pub fn first_cue_at(&self) -> Option<f64> {
        self.signals.interval.step()
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("{value} must be positive")))
    }
}
