//! Audio cue synthesis: oscillators, envelopes, mixing and PCM encoding.
//!
//! The pipeline is pure computation. Given valid input it never fails; the
//! only fallible step is serializing a clip into a WAV container.

mod cues;
pub mod envelope;
pub mod mixer;
pub mod pcm;
pub mod waveform;

pub use cues::{CueKind, CueLibrary, CueSpec, CueStyle, Voicing, DEFAULT_SAMPLE_RATE};
pub use pcm::AudioClip;
pub use waveform::Waveform;
