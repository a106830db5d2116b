//! Property and scenario tests for the timer event engine.
//!
//! Covers pause-aware elapsed time, once-per-phase latches, interval cursors
//! and the Focus/Break cycle through the public engine API.

use fokus_core::timer::{elapsed, tick, TimerState};
use fokus_core::{Event, IntervalMode, Phase, RunStatus, SignalPolicy, TimerEngine, TimerSettings};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn running_state(started_at: f64, pause_accum: f64) -> TimerState {
    let mut state = TimerState::new(3_600.0);
    state.started_at = Some(started_at);
    state.pause_accum = pause_accum;
    state.running = true;
    state
}

proptest! {
    #[test]
    fn test_elapsed_slope_is_one_while_running(
        started_at in 0.0f64..1.0e9,
        pause_accum in 0.0f64..1.0e4,
        offset in 0.0f64..1.0e5,
        step in 0.0f64..1.0e3,
    ) {
        let state = running_state(started_at, pause_accum);
        let now = started_at + pause_accum + offset;
        let a = elapsed(&state, now);
        let b = elapsed(&state, now + step);
        prop_assert!(b >= a);
        // Clock values near 1e9 leave about 1e-7 of float headroom.
        prop_assert!((b - a - step).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_slope_is_zero_while_paused(
        started_at in 0.0f64..1.0e9,
        run_for in 0.0f64..1.0e4,
        later in 0.0f64..1.0e5,
    ) {
        let mut state = running_state(started_at, 0.0);
        state.running = false;
        state.paused_at = Some(started_at + run_for);
        let frozen = elapsed(&state, started_at + run_for);
        prop_assert_eq!(frozen, elapsed(&state, started_at + run_for + later));
    }

    #[test]
    fn test_pause_resume_round_trip(
        run_for in 0.0f64..1.0e4,
        paused_for in 0.0f64..1.0e4,
    ) {
        let mut engine = TimerEngine::new(TimerSettings::default()).unwrap();
        let t0 = 1_000.0;
        engine.start(t0);
        let t1 = t0 + run_for;
        engine.pause(t1);
        let before = engine.elapsed(t1);
        let accum_before = engine.state().pause_accum;

        let t2 = t1 + paused_for;
        engine.resume(t2);
        prop_assert!((engine.state().pause_accum - accum_before - paused_for).abs() < TOLERANCE);
        prop_assert!((engine.elapsed(t2) - before).abs() < TOLERANCE);
    }

    #[test]
    fn test_elapsed_never_negative(
        started_at in 0.0f64..1.0e6,
        pause_accum in 0.0f64..1.0e4,
        now in 0.0f64..1.0e6,
    ) {
        let state = running_state(started_at, pause_accum);
        prop_assert!(elapsed(&state, now) >= 0.0);
    }
}

#[test]
fn test_half_fires_exactly_once_at_fifty() {
    let mut state = running_state(0.0, 0.0);
    let policy = SignalPolicy {
        halfway: true,
        interval: IntervalMode::None,
    };
    let mut halves = Vec::new();
    for t in [40.0, 50.0, 60.0, 70.0] {
        if tick(&mut state, t, 100.0, &policy).contains(&Event::Half) {
            halves.push(t);
        }
    }
    assert_eq!(halves, vec![50.0]);
}

#[test]
fn test_fixed_interval_ticks() {
    let mut settings = TimerSettings {
        focus_secs: 600.0,
        ..TimerSettings::default()
    };
    settings.signals.halfway = false;
    settings.signals.interval = IntervalMode::Fixed { seconds: 60.0 };
    let mut engine = TimerEngine::new(settings).unwrap();
    engine.start(0.0);

    let mut ticks = Vec::new();
    let mut cursor = vec![engine.state().next_cue_at];
    for t in [59.0, 61.0, 121.0, 179.0] {
        if engine.poll(t).contains(Event::Tick) {
            ticks.push(t);
        }
        cursor.push(engine.state().next_cue_at);
    }
    assert_eq!(ticks, vec![61.0, 121.0]);
    cursor.dedup();
    assert_eq!(cursor, vec![Some(60.0), Some(120.0), Some(180.0)]);
}

#[test]
fn test_end_without_tick_at_boundary() {
    let mut settings = TimerSettings {
        focus_secs: 10.0,
        ..TimerSettings::default()
    };
    settings.signals.interval = IntervalMode::Fixed { seconds: 5.0 };
    let mut engine = TimerEngine::new(settings).unwrap();
    engine.start(0.0);
    assert_eq!(engine.poll(5.0).events, vec![Event::Half, Event::Tick]);

    let outcome = engine.poll(10.0);
    assert!(outcome.contains(Event::End));
    assert!(!outcome.contains(Event::Tick));
}

#[test]
fn test_phase_cycle_long_break_every_fourth() {
    let settings = TimerSettings {
        focus_secs: 20.0,
        short_break_secs: 5.0,
        long_break_secs: 15.0,
        long_break_every: 4,
        auto_start_next: true,
        ..TimerSettings::default()
    };
    let mut engine = TimerEngine::new(settings).unwrap();
    let mut now = 0.0;
    engine.start(now);

    let mut breaks = Vec::new();
    while breaks.len() < 4 {
        now += engine.state().duration;
        let outcome = engine.poll(now);
        assert!(outcome.contains(Event::End));
        assert!(outcome.contains(Event::Start));
        if engine.state().phase == Phase::Break {
            breaks.push(engine.state().duration);
        }
    }
    assert_eq!(breaks, vec![5.0, 5.0, 5.0, 15.0]);
    assert_eq!(engine.state().session_index, 4);
}

#[test]
fn test_manual_cycle_waits_for_start() {
    let settings = TimerSettings {
        focus_secs: 20.0,
        short_break_secs: 5.0,
        ..TimerSettings::default()
    };
    let mut engine = TimerEngine::new(settings).unwrap();
    engine.start(0.0);
    engine.poll(20.0);
    assert_eq!(engine.state().phase, Phase::Break);
    assert_eq!(engine.status(), RunStatus::Idle);

    // Time passing without Start does nothing.
    assert!(engine.poll(500.0).is_empty());
    assert_eq!(engine.remaining(500.0), 5.0);

    assert_eq!(engine.start(500.0), Some(Event::Start));
    let outcome = engine.poll(505.0);
    assert!(outcome.contains(Event::End));
    assert_eq!(engine.state().phase, Phase::Focus);
    assert_eq!(engine.state().duration, 20.0);
}

#[test]
fn test_irregular_polls_still_end_once() {
    let settings = TimerSettings {
        focus_secs: 30.0,
        ..TimerSettings::default()
    };
    let mut engine = TimerEngine::new(settings).unwrap();
    engine.start(0.0);
    let mut ends = 0;
    for t in [0.1, 0.35, 7.0, 29.995, 29.999, 31.0, 400.0] {
        ends += engine
            .poll(t)
            .events
            .iter()
            .filter(|e| **e == Event::End)
            .count();
    }
    assert_eq!(ends, 1);
}

#[test]
fn test_pause_across_end_boundary() {
    let settings = TimerSettings {
        focus_secs: 10.0,
        ..TimerSettings::default()
    };
    let mut engine = TimerEngine::new(settings).unwrap();
    engine.start(0.0);
    engine.pause(4.0);
    // Paused well past the wall-clock end.
    assert!(engine.poll(30.0).is_empty());
    engine.resume(30.0);
    assert!(engine.poll(35.0).contains(Event::Half));
    assert!(engine.poll(36.0).contains(Event::End));
}
