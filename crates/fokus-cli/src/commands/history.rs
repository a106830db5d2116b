use clap::Args;
use fokus_core::SessionLog;

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of phases to show
    #[arg(long, default_value = "20")]
    limit: usize,
    /// Print records as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let log = SessionLog::open()?;
    let records = log.recent(args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("no completed phases");
        return Ok(());
    }
    for r in records {
        println!(
            "{}  {:<5}  {:>6.0}s  #{}  {}",
            r.ended_at.format("%Y-%m-%d %H:%M"),
            r.phase.as_str(),
            r.duration_secs,
            r.session_index,
            if r.description.is_empty() { "-" } else { r.description.as_str() },
        );
    }
    Ok(())
}
