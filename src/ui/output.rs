//! Workflow step outputs
//!
//! Runners that export `GITHUB_OUTPUT` get `name=value` lines appended to that
//! file. Anywhere else the legacy `::set-output` command is printed to stdout,
//! or logged to stderr when stdout carries a JSON report.

use crate::core::error::{ResultExt, RotateResult};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Name of the output carrying the new placeholder's id
pub const VERSION_ID_OUTPUT: &str = "version-id";

/// Where step outputs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
  /// Append to the runner's output file
  File(PathBuf),
  /// Print workflow commands to stdout
  Stdout,
  /// Log workflow commands to stderr
  Log,
}

impl StepOutput {
  /// Pick the target from the `GITHUB_OUTPUT` environment variable
  pub fn from_env() -> Self {
    match env::var_os("GITHUB_OUTPUT") {
      Some(path) if !path.is_empty() => StepOutput::File(PathBuf::from(path)),
      _ => StepOutput::Stdout,
    }
  }

  /// Move the legacy command off stdout; file targets are unchanged
  pub fn off_stdout(self) -> Self {
    match self {
      StepOutput::Stdout => StepOutput::Log,
      other => other,
    }
  }

  /// Publish one output value
  pub fn set(&self, name: &str, value: &str) -> RotateResult<()> {
    match self {
      StepOutput::File(path) => {
        let mut file = OpenOptions::new()
          .create(true)
          .append(true)
          .open(path)
          .with_context(|| format!("Failed to open step output file {}", path.display()))?;
        writeln!(file, "{}={}", name, value)
          .with_context(|| format!("Failed to write step output to {}", path.display()))?;
      }
      StepOutput::Stdout => println!("{}", set_output_command(name, value)),
      StepOutput::Log => tracing::info!("{}", set_output_command(name, value)),
    }
    tracing::debug!(name, value, "Step output set");
    Ok(())
  }
}

/// Legacy workflow command for setting an output
pub fn set_output_command(name: &str, value: &str) -> String {
  format!("::set-output name={}::{}", name, value)
}
