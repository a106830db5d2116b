use clap::{Parser, Subcommand};

mod clock;
mod commands;
mod logging;
mod playback;

#[derive(Parser)]
#[command(name = "fokus-cli", version, about = "Fokus focus timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer in the foreground
    Run(commands::run::RunArgs),
    /// Render a single cue to a WAV file
    Cue(commands::cue::CueArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Show completed phases
    History(commands::history::HistoryArgs),
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Cue(args) => commands::cue::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::History(args) => commands::history::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
