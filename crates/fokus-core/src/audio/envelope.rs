//! Linear fades applied in place to avoid clicks at clip edges.

/// Fade-in share used by every cue.
pub const HEAD_RATIO: f64 = 0.02;

/// Multiply the first `floor(head_ratio * N)` samples by a 0→1 ramp and the
/// last `floor(tail_ratio * N)` by a 1→0 ramp.
///
/// A region shorter than two samples cannot hold a ramp and is left alone.
pub fn apply(samples: &mut [f64], head_ratio: f64, tail_ratio: f64) {
    let n = samples.len();
    let head = region_len(n, head_ratio);
    let tail = region_len(n, tail_ratio);

    if head >= 2 {
        for (i, s) in samples[..head].iter_mut().enumerate() {
            *s *= ramp(i, head);
        }
    }
    if tail >= 2 {
        let start = n - tail;
        for (i, s) in samples[start..].iter_mut().enumerate() {
            *s *= 1.0 - ramp(i, tail);
        }
    }
}

fn region_len(n: usize, ratio: f64) -> usize {
    if !(ratio > 0.0) {
        return 0;
    }
    ((ratio.min(1.0) * n as f64).floor() as usize).min(n)
}

/// `i`-th point of an evenly spaced 0..=1 ramp of `len` points.
fn ramp(i: usize, len: usize) -> f64 {
    i as f64 / (len - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_go_to_zero() {
        let mut samples = vec![1.0; 1000];
        apply(&mut samples, 0.02, 0.04);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[19], 1.0);
        assert_eq!(samples[500], 1.0);
        assert_eq!(samples[959], 1.0);
        assert_eq!(samples[960], 1.0);
        assert_eq!(samples[999], 0.0);
        assert!((samples[10] - 10.0 / 19.0).abs() < 1e-12);
    }

    #[test]
    fn fades_are_monotonic() {
        let mut samples = vec![1.0; 500];
        apply(&mut samples, 0.02, 0.02);
        assert!(samples[..10].windows(2).all(|w| w[0] <= w[1]));
        assert!(samples[490..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn tiny_clips_are_left_alone() {
        let mut empty: Vec<f64> = Vec::new();
        apply(&mut empty, 0.02, 0.04);
        assert!(empty.is_empty());

        let mut short = vec![0.5; 30];
        apply(&mut short, 0.02, 0.04);
        assert_eq!(short, vec![0.5; 30]);
    }
}
