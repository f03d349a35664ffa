//! Tracing/logging initialization.
//!
//! Logs go to stderr so they never interleave with prompts on stdout.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize tracing/logging for the process.
///
/// `RUST_LOG` wins over `verbosity` when set. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
