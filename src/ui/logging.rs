//! Diagnostic logging
//!
//! Logs go to stderr so stdout stays free for step outputs and `--json`.
//! `RUST_LOG` wins over the `--verbose` flag when set.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .try_init();
}
