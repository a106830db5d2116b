//! 16-bit quantization and the WAV container handed to playback.

use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

pub const BITS_PER_SAMPLE: u16 = 16;
pub const CHANNELS: u16 = 1;

/// Mono 16-bit PCM, ready for a playback collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioClip {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Size of the WAV `data` chunk payload.
    pub fn data_len_bytes(&self) -> usize {
        self.samples.len() * usize::from(BITS_PER_SAMPLE / 8)
    }

    pub fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        }
    }

    /// Serialize as an uncompressed PCM WAV file in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the WAV writer rejects the spec or a write fails.
    pub fn to_wav(&self) -> Result<Vec<u8>, AudioError> {
        let mut bytes = Vec::with_capacity(64 + self.data_len_bytes());
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), self.wav_spec())?;
            for &sample in &self.samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }
        Ok(bytes)
    }
}

/// `round(sample * 32767)`, saturating at the i16 range.
pub fn quantize(sample: f64) -> i16 {
    let scaled = (sample * f64::from(i16::MAX)).round();
    scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Quantize a float buffer into a mono clip.
pub fn encode(buffer: &[f64], sample_rate: u32) -> AudioClip {
    AudioClip {
        samples: buffer.iter().copied().map(quantize).collect(),
        sample_rate,
        channels: CHANNELS,
    }
}
