//! Timer engine implementation.
//!
//! The timer engine is a caller-clocked state machine. It does not use
//! internal threads or read a clock - the caller passes `now` into every
//! command and is responsible for calling `poll()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!          End -> next phase (Idle, or Running when auto-starting)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings)?;
//! engine.start(now);
//! // In a loop:
//! let outcome = engine.poll(now); // events due at this instant
//! ```

use serde::{Deserialize, Serialize};

use super::phase::{self, PhaseRecord};
use super::scheduler;
use super::settings::TimerSettings;
use super::state::{self as tracker, Phase, RunStatus, TimerState};
use crate::error::ConfigError;
use crate::events::{Event, PollOutcome};

/// Read-only view for a display collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub phase: Phase,
    pub status: RunStatus,
    /// Seconds left, clamped to `[0, total]`.
    pub remaining: f64,
    pub total: f64,
    /// `0.0..=1.0`; zero when `total` is zero.
    pub fraction_remaining: f64,
    pub description: String,
    pub session_index: u32,
}

impl DisplaySnapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        let secs = self.remaining.max(0.0) as u64;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn percent_remaining(&self) -> u32 {
        (self.fraction_remaining * 100.0) as u32
    }
}

/// Core timer engine.
///
/// Owns the [`TimerState`] and the settings snapshot it was configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    settings: TimerSettings,
    state: TimerState,
}

impl TimerEngine {
    /// Create an engine in the unstarted Focus phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail validation.
    pub fn new(settings: TimerSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut state = TimerState::new(settings.focus_secs);
        state.next_cue_at = settings.first_cue_at();
        Ok(Self { settings, state })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn status(&self) -> RunStatus {
        self.state.status()
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        tracker::elapsed(&self.state, now)
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.state.duration - self.elapsed(now)).clamp(0.0, self.state.duration.max(0.0))
    }

    pub fn snapshot(&self, now: f64) -> DisplaySnapshot {
        let total = self.state.duration;
        let remaining = self.remaining(now);
        let fraction_remaining = if total > 0.0 {
            (remaining / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        DisplaySnapshot {
            phase: self.state.phase,
            status: self.status(),
            remaining,
            total,
            fraction_remaining,
            description: self.settings.description.clone(),
            session_index: self.state.session_index,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the current phase. A paused phase is resumed instead.
    ///
    /// Returns `Some(Event::Start)` only for a fresh start.
    pub fn start(&mut self, now: f64) -> Option<Event> {
        match self.status() {
            RunStatus::Idle => {
                let first_cue_at = self.settings.first_cue_at();
                self.state.clear_phase(self.state.duration, first_cue_at);
                self.state.begin(now);
                tracing::info!(
                    phase = self.state.phase.as_str(),
                    duration_secs = self.state.duration,
                    "phase started"
                );
                Some(Event::Start)
            }
            RunStatus::Paused => {
                self.resume(now);
                None
            }
            RunStatus::Running => None,
        }
    }

    pub fn pause(&mut self, now: f64) -> bool {
        let paused = self.state.pause_at(now);
        if paused {
            tracing::debug!(elapsed = self.elapsed(now), "paused");
        }
        paused
    }

    pub fn resume(&mut self, now: f64) -> bool {
        let resumed = self.state.resume_at(now);
        if resumed {
            tracing::debug!(pause_accum = self.state.pause_accum, "resumed");
        }
        resumed
    }

    /// Back to an unstarted first Focus phase, from any state.
    pub fn reset(&mut self) {
        self.state = TimerState::new(self.settings.focus_secs);
        self.state.next_cue_at = self.settings.first_cue_at();
        tracing::info!("timer reset");
    }

    /// Replace the settings snapshot.
    ///
    /// A running phase restarts at `now` with the new duration for its
    /// phase; an idle or paused phase is left unstarted with that duration.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the engine untouched if validation fails.
    pub fn apply_settings(&mut self, settings: TimerSettings, now: f64) -> Result<(), ConfigError> {
        settings.validate()?;
        let was_running = self.state.running;
        self.settings = settings;

        let duration = match self.state.phase {
            Phase::Focus => self.settings.focus_secs,
            Phase::Break => self.settings.break_secs_after(self.state.session_index),
        };
        self.state.clear_phase(duration, self.settings.first_cue_at());
        if was_running {
            self.state.begin(now);
        }
        tracing::info!(
            phase = self.state.phase.as_str(),
            duration_secs = duration,
            restarted = was_running,
            "settings applied"
        );
        Ok(())
    }

    /// Evaluate everything due at `now`.
    ///
    /// On End the phase machine runs before returning, so the outcome may
    /// also carry `PhaseSwitch`, `Start` and the completed [`PhaseRecord`].
    pub fn poll(&mut self, now: f64) -> PollOutcome {
        let elapsed = self.elapsed(now);
        let beat = self.state.beat_index;
        let total = self.state.duration;
        let mut events = scheduler::tick(&mut self.state, elapsed, total, &self.settings.signals);

        let rhythmic = self.settings.signals.interval.is_rhythmic();
        let beat = (rhythmic && events.contains(&Event::Tick)).then_some(beat);
        let mut completed: Option<PhaseRecord> = None;
        if events.contains(&Event::End) {
            let (record, more) = phase::advance(&mut self.state, &self.settings, now);
            events.extend(more);
            completed = Some(record);
        }

        PollOutcome {
            events,
            beat,
            completed,
        }
    }
}
