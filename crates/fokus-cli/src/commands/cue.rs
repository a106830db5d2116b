use std::path::PathBuf;

use clap::Args;
use fokus_core::{CueKind, CueLibrary, CueStyle};

#[derive(Args)]
pub struct CueArgs {
    /// Cue to render: start, half, tick or end
    kind: CueKind,
    /// Output WAV file
    #[arg(long, short)]
    out: PathBuf,
    /// soft, clear or classic (defaults to the configured style)
    #[arg(long)]
    style: Option<CueStyle>,
    /// 0.0 to 1.0 (defaults to the configured volume)
    #[arg(long)]
    volume: Option<f64>,
    /// Rhythmic beat position for tick cues (0 is the downbeat)
    #[arg(long)]
    beat: Option<u8>,
    #[arg(long, default_value_t = fokus_core::audio::DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,
}

pub fn run(args: CueArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = fokus_core::Config::load_or_default();
    let style = args.style.unwrap_or(config.signals.style);
    let volume = args.volume.unwrap_or(config.signals.volume);
    if !(0.0..=1.0).contains(&volume) {
        return Err(format!("volume {volume} is outside 0.0..=1.0").into());
    }
    if args.sample_rate == 0 {
        return Err("sample rate must be positive".into());
    }

    let clip = CueLibrary::new(args.sample_rate).render_event(args.kind, style, volume, args.beat);
    std::fs::write(&args.out, clip.to_wav()?)?;
    println!(
        "{} ({} samples, {:.2}s) -> {}",
        args.kind.as_str(),
        clip.samples.len(),
        clip.duration_secs(),
        args.out.display()
    );
    Ok(())
}
