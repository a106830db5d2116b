//! Stderr logging for the CLI.
//!
//! `RUST_LOG` overrides the default `info` level. Set `FOKUS_DEBUG=1` to get
//! debug output (including every dispatched cue) from the fokus crates.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    let debug_logging = std::env::var("FOKUS_DEBUG").is_ok();
    let default_directive = if debug_logging {
        "info,fokus_core=debug,fokus_cli=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init();

    tracing::debug!(debug_logging, "logging initialized");
}
