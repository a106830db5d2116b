//! Wiring between the timer engine, the cue library and the collaborators.
//!
//! [`Session`] is what a driver loop owns: it forwards control actions to the
//! [`TimerEngine`], turns every cue-bearing event into an [`AudioClip`] and
//! hands it to a [`Playback`], and appends completed phases to a [`PhaseLog`].
//! Collaborator failures are logged and never interrupt the timer.

use crate::audio::{AudioClip, CueLibrary};
use crate::error::{ConfigError, Result};
use crate::events::{Event, PollOutcome};
use crate::timer::{DisplaySnapshot, PhaseRecord, TimerEngine, TimerSettings};

/// Renders clips audibly. There is no feedback channel; implementations
/// swallow their own failures.
pub trait Playback {
    fn play(&mut self, clip: &AudioClip);
}

/// Append-only sink for completed phases.
pub trait PhaseLog {
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn append(&mut self, record: &PhaseRecord) -> Result<()>;
}

/// Playback that discards every clip.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Playback for Silent {
    fn play(&mut self, _clip: &AudioClip) {}
}

/// Log that keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLog;

impl PhaseLog for NoLog {
    fn append(&mut self, _record: &PhaseRecord) -> Result<()> {
        Ok(())
    }
}

impl<P: Playback + ?Sized> Playback for &mut P {
    fn play(&mut self, clip: &AudioClip) {
        (**self).play(clip);
    }
}

impl<L: PhaseLog + ?Sized> PhaseLog for &mut L {
    fn append(&mut self, record: &PhaseRecord) -> Result<()> {
        (**self).append(record)
    }
}

pub struct Session<P, L> {
    engine: TimerEngine,
    cues: CueLibrary,
    playback: P,
    log: L,
}

impl<P: Playback, L: PhaseLog> Session<P, L> {
    pub fn new(engine: TimerEngine, cues: CueLibrary, playback: P, log: L) -> Self {
        Self {
            engine,
            cues,
            playback,
            log,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn snapshot(&self, now: f64) -> DisplaySnapshot {
        self.engine.snapshot(now)
    }

    pub fn start(&mut self, now: f64) {
        if let Some(event) = self.engine.start(now) {
            self.dispatch(event, None);
        }
    }

    pub fn pause(&mut self, now: f64) -> bool {
        self.engine.pause(now)
    }

    pub fn resume(&mut self, now: f64) -> bool {
        self.engine.resume(now)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// # Errors
    ///
    /// Returns an error if the settings fail validation.
    pub fn apply_settings(&mut self, settings: TimerSettings, now: f64) -> Result<(), ConfigError> {
        self.engine.apply_settings(settings, now)
    }

    /// Poll the engine, sound every due cue in event order and log a
    /// completed phase.
    pub fn poll(&mut self, now: f64) -> PollOutcome {
        let outcome = self.engine.poll(now);
        for &event in &outcome.events {
            let beat = if event == Event::Tick { outcome.beat } else { None };
            self.dispatch(event, beat);
        }
        if let Some(record) = &outcome.completed {
            if let Err(e) = self.log.append(record) {
                tracing::warn!(error = %e, phase = record.phase.as_str(), "failed to log phase");
            }
        }
        outcome
    }

    fn dispatch(&mut self, event: Event, beat: Option<u8>) {
        let Some(kind) = event.cue_kind() else {
            return;
        };
        let settings = self.engine.settings();
        let clip = self.cues.render_event(kind, settings.style, settings.volume, beat);
        tracing::debug!(
            cue = kind.as_str(),
            samples = clip.samples.len(),
            sample_rate = clip.sample_rate,
            "dispatching cue"
        );
        self.playback.play(&clip);
    }
}
