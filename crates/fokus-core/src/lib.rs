//! # Fokus Core Library
//!
//! This library provides the core logic for the Fokus focus/interval timer:
//! deciding *when* an audio cue is due and synthesizing *what* it sounds
//! like. The `fokus-cli` binary is a thin driver over the same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A caller-clocked state machine; the caller passes
//!   `now` and periodically invokes `poll()` for due events
//! - **Audio**: Waveform generation, enveloping, soft-limited mixing and
//!   16-bit WAV encoding, driven by a cue library
//! - **Session**: Glue that routes engine events to cues and completed
//!   phases to a log
//! - **Storage**: TOML-based configuration and SQLite phase log
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`CueLibrary`]: Event-to-sound rendering
//! - [`Session`]: Engine plus playback and logging collaborators
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use audio::{AudioClip, CueKind, CueLibrary, CueSpec, CueStyle, Waveform};
pub use error::{AudioError, ConfigError, CoreError, StorageError};
pub use events::{Event, PollOutcome};
pub use session::{NoLog, PhaseLog, Playback, Session, Silent};
pub use storage::{Config, SessionLog};
pub use timer::{
    DisplaySnapshot, IntervalMode, Phase, PhaseRecord, RunStatus, SignalPolicy, TimerEngine,
    TimerSettings, TimerState,
};
