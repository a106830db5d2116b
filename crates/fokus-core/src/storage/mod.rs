mod config;
pub mod session_log;

pub use config::{Config, Preset, SignalsConfig, TimerConfig};
pub use session_log::SessionLog;

use std::path::PathBuf;

/// Returns `~/.config/fokus[-dev]/` based on FOKUS_ENV.
///
/// Set FOKUS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOKUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fokus-dev")
    } else {
        base_dir.join("fokus")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
