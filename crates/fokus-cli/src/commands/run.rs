use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use fokus_core::{
    Config, CueLibrary, DisplaySnapshot, NoLog, PhaseLog, RunStatus, Session, SessionLog,
    TimerEngine,
};

use crate::clock::now_secs;
use crate::playback::TerminalPlayback;

#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many completed phases
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    phases: u32,
    /// Override the focus length in seconds
    #[arg(long)]
    focus_secs: Option<f64>,
    /// Write every cue as a WAV file into this directory
    #[arg(long)]
    cue_dir: Option<PathBuf>,
    /// Ring the terminal bell on every cue
    #[arg(long)]
    bell: bool,
    /// Poll interval in milliseconds
    #[arg(long, default_value = "200")]
    poll_ms: u64,
    /// Do not record completed phases
    #[arg(long)]
    no_log: bool,
    /// Print one JSON snapshot per poll instead of a status line
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.poll_ms == 0 {
        return Err("poll interval must be positive".into());
    }

    let config = Config::load()?;
    let mut settings = config.to_settings()?;
    if let Some(secs) = args.focus_secs {
        settings.focus_secs = secs;
    }
    let engine = TimerEngine::new(settings)?;
    let playback = TerminalPlayback::new(args.cue_dir.clone(), args.bell);

    if args.no_log {
        drive(Session::new(engine, CueLibrary::default(), playback, NoLog), &args)
    } else {
        let log = SessionLog::open()?;
        drive(Session::new(engine, CueLibrary::default(), playback, log), &args)
    }
}

fn drive<L: PhaseLog>(
    mut session: Session<TerminalPlayback, L>,
    args: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let interval = Duration::from_millis(args.poll_ms);
    let mut completed = 0;

    session.start(now_secs());
    loop {
        let now = now_secs();
        let outcome = session.poll(now);
        let snapshot = session.snapshot(now);
        render(&snapshot, args.json)?;

        if let Some(record) = &outcome.completed {
            completed += 1;
            if !args.json {
                println!();
            }
            tracing::info!(
                phase = record.phase.as_str(),
                duration_secs = record.duration_secs,
                session_index = record.session_index,
                "phase complete"
            );
            if completed >= args.phases {
                break;
            }
            if snapshot.status == RunStatus::Idle {
                wait_for_enter(&snapshot)?;
                session.start(now_secs());
            }
        }

        std::thread::sleep(interval);
    }
    Ok(())
}

fn render(snapshot: &DisplaySnapshot, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    if json {
        writeln!(stdout, "{}", serde_json::to_string(snapshot)?)?;
    } else {
        let description = if snapshot.description.is_empty() {
            "-"
        } else {
            snapshot.description.as_str()
        };
        write!(
            stdout,
            "\r[{:<5}] {}  {:>3}% remaining  {}   ",
            snapshot.phase.as_str(),
            snapshot.clock(),
            snapshot.percent_remaining(),
            description
        )?;
    }
    stdout.flush()?;
    Ok(())
}

/// The explicit Start for a phase that did not auto-start.
fn wait_for_enter(snapshot: &DisplaySnapshot) -> Result<(), Box<dyn std::error::Error>> {
    eprint!(
        "{} ready ({}). Press Enter to start...",
        snapshot.phase.as_str(),
        snapshot.clock()
    );
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err("stdin closed before the next phase was started".into());
    }
    Ok(())
}
