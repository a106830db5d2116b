//! Event-to-sound mapping.
//!
//! Milestone cues (start, half, end) are major triads on a distinct root per
//! kind; the style only picks waveform and voice count, never pitch. Ticks
//! are a quiet two-note sine motif regardless of style.

use serde::{Deserialize, Serialize};

use super::envelope::{self, HEAD_RATIO};
use super::mixer;
use super::pcm::{self, AudioClip};
use super::waveform::{self, Waveform};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

const MAJOR_THIRD: f64 = 1.259_921_049_894_873_2; // 2^(4/12)
const PERFECT_FIFTH: f64 = 1.498_307_076_876_681_5; // 2^(7/12)

const TICK_GAIN: f64 = 0.35;
const SOFT_VOICE_GAIN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    Start,
    Half,
    Tick,
    End,
}

impl CueKind {
    pub fn root_hz(self) -> f64 {
        match self {
            CueKind::Start => 440.0,
            CueKind::Half => 587.33,
            CueKind::End => 523.25,
            CueKind::Tick => 880.0,
        }
    }

    /// Length of each tone; motif notes play back to back.
    pub fn tone_secs(self) -> f64 {
        match self {
            CueKind::Start => 0.30,
            CueKind::Half => 0.25,
            CueKind::End => 0.45,
            CueKind::Tick => 0.07,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CueKind::Start => "start",
            CueKind::Half => "half",
            CueKind::Tick => "tick",
            CueKind::End => "end",
        }
    }
}

impl std::str::FromStr for CueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(CueKind::Start),
            "half" => Ok(CueKind::Half),
            "tick" => Ok(CueKind::Tick),
            "end" => Ok(CueKind::End),
            other => Err(format!("unknown cue kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueStyle {
    /// Sine triad at reduced per-voice gain.
    #[default]
    Soft,
    /// Root only, sine.
    Clear,
    /// Triangle triad.
    Classic,
}

impl std::str::FromStr for CueStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" => Ok(CueStyle::Soft),
            "clear" => Ok(CueStyle::Clear),
            "classic" => Ok(CueStyle::Classic),
            other => Err(format!("unknown cue style: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voicing {
    /// All frequencies sound together.
    Chord,
    /// Frequencies sound one after another.
    Motif,
}

/// Immutable recipe for one cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSpec {
    pub frequencies: Vec<f64>,
    pub tone_secs: f64,
    pub waveform: Waveform,
    /// Per-voice mixing weight.
    pub gain: f64,
    pub voicing: Voicing,
    /// Fade-out share of each tone.
    pub tail_ratio: f64,
}

impl CueSpec {
    /// Look up the recipe for `kind` in `style`.
    ///
    /// `beat` is the rhythmic beat position of a tick; beat 0 is voiced an
    /// octave up. Ignored for other kinds.
    pub fn for_event(kind: CueKind, style: CueStyle, beat: Option<u8>) -> Self {
        let root = kind.root_hz();
        if kind == CueKind::Tick {
            let octave = if beat == Some(0) { 2.0 } else { 1.0 };
            return Self {
                frequencies: vec![root * octave, root * PERFECT_FIFTH * octave],
                tone_secs: kind.tone_secs(),
                waveform: Waveform::Sine,
                gain: TICK_GAIN,
                voicing: Voicing::Motif,
                tail_ratio: 0.02,
            };
        }

        let triad = vec![root, root * MAJOR_THIRD, root * PERFECT_FIFTH];
        let (frequencies, waveform, gain) = match style {
            CueStyle::Soft => (triad, Waveform::Sine, SOFT_VOICE_GAIN),
            CueStyle::Clear => (vec![root], Waveform::Sine, 1.0),
            CueStyle::Classic => (triad, Waveform::Triangle, 1.0),
        };
        Self {
            frequencies,
            tone_secs: kind.tone_secs(),
            waveform,
            gain,
            voicing: Voicing::Chord,
            tail_ratio: 0.04,
        }
    }
}

/// Renders cue recipes into PCM clips. No caching; every call synthesizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueLibrary {
    sample_rate: u32,
}

impl Default for CueLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl CueLibrary {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Generate, envelope, mix, scale by `volume` and quantize.
    pub fn render(&self, spec: &CueSpec, volume: f64) -> AudioClip {
        let tone = |freq: f64| {
            let mut samples = waveform::generate(freq, spec.tone_secs, self.sample_rate, spec.waveform);
            envelope::apply(&mut samples, HEAD_RATIO, spec.tail_ratio);
            samples.iter_mut().for_each(|s| *s *= spec.gain);
            samples
        };

        let voices: Vec<Vec<f64>> = match spec.voicing {
            Voicing::Chord => spec.frequencies.iter().map(|&f| tone(f)).collect(),
            Voicing::Motif => vec![spec.frequencies.iter().flat_map(|&f| tone(f)).collect()],
        };

        let mut mixed = mixer::mix(&voices);
        let volume = volume.clamp(0.0, 1.0);
        mixed.iter_mut().for_each(|s| *s *= volume);
        pcm::encode(&mixed, self.sample_rate)
    }

    pub fn render_event(&self, kind: CueKind, style: CueStyle, volume: f64, beat: Option<u8>) -> AudioClip {
        self.render(&CueSpec::for_event(kind, style, beat), volume)
    }
}
