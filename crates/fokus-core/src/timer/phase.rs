//! Focus ⇄ Break cycling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::settings::TimerSettings;
use super::state::{Phase, TimerState};
use crate::events::Event;

/// One completed phase, as handed to the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: f64,
    /// Completed focus count after this phase ended.
    pub session_index: u32,
    pub long_break_every: u32,
}

/// Move `state` into the next phase after an End at `now`.
///
/// Returns the record of the phase that ended and the events the transition
/// raised (`PhaseSwitch`, plus `Start` when auto-continuing).
pub fn advance(
    state: &mut TimerState,
    settings: &TimerSettings,
    now: f64,
) -> (PhaseRecord, Vec<Event>) {
    let ended = state.phase;
    let started_at = state.started_at.unwrap_or(now);
    let duration = state.duration;

    let (next_phase, next_duration) = match ended {
        Phase::Focus => {
            state.session_index += 1;
            (Phase::Break, settings.break_secs_after(state.session_index))
        }
        Phase::Break => (Phase::Focus, settings.focus_secs),
    };

    let record = PhaseRecord {
        phase: ended,
        description: settings.description.clone(),
        started_at: to_utc(started_at),
        ended_at: to_utc(now),
        duration_secs: duration,
        session_index: state.session_index,
        long_break_every: settings.long_break_every,
    };

    state.phase = next_phase;
    state.clear_phase(next_duration, settings.first_cue_at());

    let mut events = vec![Event::PhaseSwitch];
    if settings.auto_start_next {
        state.begin(now);
        events.push(Event::Start);
    }

    tracing::info!(
        ended = ended.as_str(),
        next = next_phase.as_str(),
        next_duration_secs = next_duration,
        session_index = state.session_index,
        auto_start = settings.auto_start_next,
        "phase transition"
    );

    (record, events)
}

/// Caller clock seconds to a UTC timestamp. Out-of-range values fall back to
/// the epoch.
pub(crate) fn to_utc(secs: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64).unwrap_or_default()
}
