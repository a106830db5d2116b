//! Voice summing with a global soft limiter.

/// Peaks are held below `1 / LIMITER_HEADROOM` once they reach unity.
pub const LIMITER_HEADROOM: f64 = 1.2;

/// Sum voices elementwise, zero-padding shorter ones, then rescale the whole
/// buffer by `1 / max(1, peak * 1.2)`.
///
/// No voices yields one silent sample.
pub fn mix<V: AsRef<[f64]>>(voices: &[V]) -> Vec<f64> {
    let len = voices.iter().map(|v| v.as_ref().len()).max().unwrap_or(0);
    if len == 0 {
        return vec![0.0];
    }

    let mut out = vec![0.0; len];
    for voice in voices {
        for (acc, &s) in out.iter_mut().zip(voice.as_ref()) {
            *acc += s;
        }
    }

    let peak = out.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    let gain = 1.0 / (peak * LIMITER_HEADROOM).max(1.0);
    if gain < 1.0 {
        out.iter_mut().for_each(|s| *s *= gain);
    }
    out
}
