//! Timer state aggregate and pause-aware elapsed-time tracking.
//!
//! All timestamps are seconds on a clock supplied by the caller (the CLI uses
//! seconds since the Unix epoch). The engine never reads a clock itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }
}

/// Which of the three externally visible conditions the timer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Paused,
}

/// The single mutable aggregate behind the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// Seconds allotted to the current phase.
    pub duration: f64,
    pub started_at: Option<f64>,
    /// Present iff paused.
    pub paused_at: Option<f64>,
    /// Seconds spent paused during the current phase.
    pub pause_accum: f64,
    pub running: bool,
    pub half_fired: bool,
    /// Elapsed offset of the next interval cue.
    pub next_cue_at: Option<f64>,
    /// Rhythmic beat position, always in `0..4`.
    pub beat_index: u8,
    /// Completed Focus phases since the last reset.
    pub session_index: u32,
}

impl TimerState {
    pub fn new(focus_duration: f64) -> Self {
        Self {
            phase: Phase::Focus,
            duration: focus_duration,
            started_at: None,
            paused_at: None,
            pause_accum: 0.0,
            running: false,
            half_fired: false,
            next_cue_at: None,
            beat_index: 0,
            session_index: 0,
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.running {
            RunStatus::Running
        } else if self.paused_at.is_some() {
            RunStatus::Paused
        } else {
            RunStatus::Idle
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Clear every per-phase latch and leave the phase unstarted.
    pub(crate) fn clear_phase(&mut self, duration: f64, first_cue_at: Option<f64>) {
        self.duration = duration;
        self.started_at = None;
        self.paused_at = None;
        self.pause_accum = 0.0;
        self.running = false;
        self.half_fired = false;
        self.next_cue_at = first_cue_at;
        self.beat_index = 0;
    }

    /// Begin the current phase at `now`.
    pub(crate) fn begin(&mut self, now: f64) {
        self.started_at = Some(now);
        self.paused_at = None;
        self.pause_accum = 0.0;
        self.running = true;
    }

    pub(crate) fn pause_at(&mut self, now: f64) -> bool {
        if !self.running {
            return false;
        }
        self.paused_at = Some(now);
        self.running = false;
        true
    }

    /// Fold the pause into `pause_accum` so elapsed time continues from where
    /// it froze.
    pub(crate) fn resume_at(&mut self, now: f64) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        self.pause_accum += (now - paused_at).max(0.0);
        self.running = true;
        true
    }
}

/// Elapsed active seconds in the current phase.
///
/// Zero before start, frozen while paused, never negative.
pub fn elapsed(state: &TimerState, now: f64) -> f64 {
    let Some(started_at) = state.started_at else {
        return 0.0;
    };
    let reference = match state.paused_at {
        Some(paused_at) if !state.running => paused_at,
        _ => now,
    };
    (reference - started_at - state.pause_accum).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_from(start: f64) -> TimerState {
        let mut state = TimerState::new(100.0);
        state.begin(start);
        state
    }

    #[test]
    fn unstarted_elapsed_is_zero() {
        let state = TimerState::new(100.0);
        assert_eq!(elapsed(&state, 1_000.0), 0.0);
        assert_eq!(state.status(), RunStatus::Idle);
    }

    #[test]
    fn running_elapsed_tracks_clock() {
        let state = running_from(1_000.0);
        assert_eq!(elapsed(&state, 1_012.5), 12.5);
        assert_eq!(state.status(), RunStatus::Running);
    }

    #[test]
    fn paused_elapsed_is_frozen() {
        let mut state = running_from(1_000.0);
        assert!(state.pause_at(1_030.0));
        assert_eq!(state.status(), RunStatus::Paused);
        assert_eq!(elapsed(&state, 1_031.0), 30.0);
        assert_eq!(elapsed(&state, 1_500.0), 30.0);
    }

    #[test]
    fn resume_adds_exact_pause_length() {
        let mut state = running_from(0.0);
        state.pause_at(20.0);
        assert!(state.resume_at(65.0));
        assert_eq!(state.pause_accum, 45.0);
        assert_eq!(elapsed(&state, 65.0), 20.0);
        assert_eq!(elapsed(&state, 70.0), 25.0);
    }

    #[test]
    fn pause_and_resume_reject_wrong_state() {
        let mut state = TimerState::new(100.0);
        assert!(!state.pause_at(1.0));
        assert!(!state.resume_at(1.0));
        state.begin(0.0);
        assert!(!state.resume_at(1.0));
    }

    #[test]
    fn clock_before_start_clamps_to_zero() {
        let state = running_from(50.0);
        assert_eq!(elapsed(&state, 10.0), 0.0);
    }
}
