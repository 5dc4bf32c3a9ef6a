// src/logging.rs

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FANSIM_LOG=debug`.
pub const LOG_ENV: &str = "FANSIM_LOG";

/// Installs the global `fmt` subscriber. Defaults to `info` when
/// `FANSIM_LOG` is unset or unparsable.
///
/// Logs go to stderr so the printed report on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
