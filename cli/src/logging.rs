#![deny(missing_docs)]

//! Logging setup for the CLI.
//!
//! Logs go to stderr so the generated document can be piped from stdout.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is a
/// no-op.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
