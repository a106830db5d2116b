//! Event scheduling for a single poll.
//!
//! Rules are evaluated in a fixed order (Half, Tick, End). Idempotency comes
//! entirely from the `half_fired` latch, the `next_cue_at` cursor and the
//! `running` flag stored in [`TimerState`].

use super::settings::SignalPolicy;
use super::state::TimerState;
use crate::events::Event;

/// Remaining time at or below this counts as finished. Absorbs poll jitter.
pub const END_EPSILON: f64 = 0.01;

/// Decide which events are due at `elapsed` and advance latches.
///
/// Returns events in firing order. A tick fired in rhythmic mode advances
/// `beat_index`; read it before calling if the beat position matters.
pub fn tick(
    state: &mut TimerState,
    elapsed: f64,
    total: f64,
    policy: &SignalPolicy,
) -> Vec<Event> {
    let mut events = Vec::new();
    let remaining = total - elapsed;

    if state.running && total > 0.0 {
        if policy.halfway && !state.half_fired && elapsed >= total / 2.0 {
            state.half_fired = true;
            events.push(Event::Half);
        }

        if let (Some(step), Some(next)) = (policy.interval.step(), state.next_cue_at) {
            // One step per poll, even after a stall that skipped several
            // boundaries.
            if elapsed >= next && remaining > 0.0 {
                state.next_cue_at = Some(next + step);
                if policy.interval.is_rhythmic() {
                    state.beat_index = (state.beat_index + 1) % 4;
                }
                events.push(Event::Tick);
            }
        }
    }

    let live = state.running || state.paused_at.is_some();
    if state.is_started() && live && remaining <= END_EPSILON {
        state.running = false;
        state.paused_at = None;
        events.push(Event::End);
    }

    events
}
