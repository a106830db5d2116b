//! Procedural oscillators.
//!
//! Each shape is the literal closed-form expression evaluated at
//! `t = i / sample_rate`; there is no band-limiting or phase accumulation.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Value of the waveform at time `t` for frequency `freq`.
    pub fn sample(self, freq: f64, t: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * freq * t).sin(),
            Waveform::Square => sign((2.0 * PI * freq * t).sin()),
            Waveform::Triangle => (2.0 / PI) * (2.0 * PI * freq * t).sin().asin(),
            Waveform::Sawtooth => {
                let x = freq * t;
                2.0 * (x - (0.5 + x).floor())
            }
        }
    }
}

/// `-1`, `0` or `1`. Unlike `f64::signum`, zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Number of samples a clip of `duration` seconds occupies.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    if !duration.is_finite() || duration <= 0.0 {
        return 0;
    }
    (f64::from(sample_rate) * duration).floor() as usize
}

/// Render `duration` seconds of `waveform` at `freq` Hz.
pub fn generate(freq: f64, duration: f64, sample_rate: u32, waveform: Waveform) -> Vec<f64> {
    let n = sample_count(duration, sample_rate);
    let rate = f64::from(sample_rate);
    (0..n)
        .map(|i| waveform.sample(freq, i as f64 / rate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_sign_of_sine() {
        let sine = generate(440.0, 1.0, 8, Waveform::Sine);
        let square = generate(440.0, 1.0, 8, Waveform::Square);
        assert_eq!(square.len(), 8);
        let expected: Vec<f64> = sine.iter().map(|&s| sign(s)).collect();
        assert_eq!(square, expected);
    }

    #[test]
    fn sine_matches_formula() {
        let rate = 8_000;
        let wave = generate(440.0, 0.01, rate, Waveform::Sine);
        assert_eq!(wave.len(), 80);
        for (i, &s) in wave.iter().enumerate() {
            let t = i as f64 / rate as f64;
            assert_eq!(s, (2.0 * PI * 440.0 * t).sin());
        }
    }

    #[test]
    fn triangle_matches_formula() {
        let rate = 8_000;
        let wave = generate(440.0, 0.01, rate, Waveform::Triangle);
        assert_eq!(wave.len(), 80);
        for (i, &s) in wave.iter().enumerate() {
            let t = i as f64 / rate as f64;
            assert_eq!(s, (2.0 / PI) * (2.0 * PI * 440.0 * t).sin().asin());
        }
    }

    #[test]
    fn triangle_is_continuous_and_bounded() {
        let wave = generate(100.0, 0.05, 48_000, Waveform::Triangle);
        assert!(wave.iter().all(|s| (-1.0..=1.0).contains(s)));
        // Max step of a 100 Hz triangle is 4 * f / rate.
        let max_step = 4.0 * 100.0 / 48_000.0 + 1e-6;
        assert!(wave.windows(2).all(|w| (w[1] - w[0]).abs() <= max_step));
        // Quarter period reaches the peak.
        assert!((Waveform::Triangle.sample(100.0, 0.0025) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sawtooth_ramps_and_wraps() {
        assert_eq!(Waveform::Sawtooth.sample(1.0, 0.0), 0.0);
        assert_eq!(Waveform::Sawtooth.sample(1.0, 0.25), 0.5);
        // f*t = 0.5 wraps to the bottom of the ramp.
        assert_eq!(Waveform::Sawtooth.sample(1.0, 0.5), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(1.0, 0.75), -0.5);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
    }

    #[test]
    fn non_positive_duration_is_empty() {
        assert!(generate(440.0, 0.0, 44_100, Waveform::Sine).is_empty());
        assert!(generate(440.0, -1.0, 44_100, Waveform::Sine).is_empty());
        assert_eq!(generate(440.0, 0.5, 44_100, Waveform::Sawtooth).len(), 22_050);
    }
}
