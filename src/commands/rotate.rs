//! The rotate command: validate inputs, rotate versions, publish the step output

use crate::core::config::RotateConfig;
use crate::core::dates;
use crate::core::error::{ResultExt, RotateResult};
use crate::rotate::rotate;
use crate::tracker::MantisClient;
use crate::ui::output::{StepOutput, VERSION_ID_OUTPUT};

/// Flags that change how a rotation runs, not what it rotates
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateOptions {
  /// Resolve only; log the writes instead of sending them
  pub dry_run: bool,
  /// Print the outcome as JSON on stdout; the legacy output command then goes to the log
  pub json: bool,
}

/// Run the rotate command
pub fn run_rotate(config: RotateConfig, options: RotateOptions) -> RotateResult<()> {
  let plan = config.validate()?;

  tracing::info!(
    url = %plan.base_url,
    project = %plan.project,
    release = %plan.release_name,
    placeholder = %plan.placeholder_name,
    days = plan.next_release_in_days,
    dry_run = options.dry_run,
    "Rotating version"
  );

  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to start async runtime")?;

  let client = MantisClient::from_plan(&plan)?;
  let outcome = runtime.block_on(rotate(&client, &plan, dates::today(), options.dry_run))?;

  let mut step_output = StepOutput::from_env();
  if options.json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    step_output = step_output.off_stdout();
  }

  match outcome.version_id() {
    Some(id) => step_output.set(VERSION_ID_OUTPUT, &id.to_string())?,
    None => tracing::info!("[dry-run] Step output not written"),
  }

  Ok(())
}
