//! Integration tests for the cue synthesis pipeline.
//!
//! Exercises generator, envelope, mixer and encoder together and checks the
//! WAV container a playback collaborator would receive.

use std::io::Cursor;

use fokus_core::audio::{envelope, mixer, pcm, waveform};
use fokus_core::{CueKind, CueLibrary, CueSpec, CueStyle, Waveform};

#[test]
fn test_square_equals_sign_of_sine() {
    let sine = waveform::generate(440.0, 1.0, 8, Waveform::Sine);
    let square = waveform::generate(440.0, 1.0, 8, Waveform::Square);
    let signed: Vec<f64> = sine.into_iter().map(waveform::sign).collect();
    assert_eq!(square, signed);
}

#[test]
fn test_empty_mix_is_silent_sample() {
    let voices: Vec<Vec<f64>> = Vec::new();
    assert_eq!(mixer::mix(&voices), vec![0.0]);
}

#[test]
fn test_silence_round_trip_byte_length() {
    let sample_rate = 16_000;
    let duration = 0.25;
    let n = waveform::sample_count(duration, sample_rate);
    let clip = pcm::encode(&vec![0.0; n], sample_rate);

    assert!(clip.samples.iter().all(|&s| s == 0));
    assert_eq!(clip.data_len_bytes(), (2.0 * sample_rate as f64 * duration) as usize);

    let bytes = clip.to_wav().unwrap();
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.len() as usize, n);
    assert_eq!(reader.spec().bits_per_sample, 16);
}

#[test]
fn test_manual_pipeline_matches_library() {
    let rate = 8_000;
    let spec = CueSpec::for_event(CueKind::Half, CueStyle::Classic, None);

    let voices: Vec<Vec<f64>> = spec
        .frequencies
        .iter()
        .map(|&f| {
            let mut tone = waveform::generate(f, spec.tone_secs, rate, spec.waveform);
            envelope::apply(&mut tone, envelope::HEAD_RATIO, spec.tail_ratio);
            tone.iter_mut().for_each(|s| *s *= spec.gain);
            tone
        })
        .collect();
    let mixed: Vec<f64> = mixer::mix(&voices).into_iter().map(|s| s * 0.7).collect();
    let manual = pcm::encode(&mixed, rate);

    let library = CueLibrary::new(rate).render(&spec, 0.7);
    assert_eq!(manual, library);
}

#[test]
fn test_every_cue_renders_valid_wav() {
    let library = CueLibrary::default();
    for style in [CueStyle::Soft, CueStyle::Clear, CueStyle::Classic] {
        for kind in [CueKind::Start, CueKind::Half, CueKind::Tick, CueKind::End] {
            let clip = library.render_event(kind, style, 0.5, None);
            assert!(!clip.samples.is_empty(), "{kind:?}/{style:?} is empty");
            assert!(clip.duration_secs() < 0.5);

            let bytes = clip.to_wav().unwrap();
            let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
            assert_eq!(reader.spec().channels, 1);
            assert_eq!(reader.spec().sample_rate, 44_100);
            let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
            assert_eq!(decoded, clip.samples);
        }
    }
}

#[test]
fn test_zero_length_tone_degrades_to_silence() {
    let spec = CueSpec {
        frequencies: vec![440.0, 550.0],
        tone_secs: 0.0,
        waveform: Waveform::Sawtooth,
        gain: 1.0,
        voicing: fokus_core::audio::Voicing::Chord,
        tail_ratio: 0.04,
    };
    let clip = CueLibrary::default().render(&spec, 1.0);
    assert_eq!(clip.samples, vec![0]);
    assert!(clip.to_wav().is_ok());
}
