mod commands;
mod core;
mod rotate;
mod tracker;
mod ui;

use clap::Parser;
use commands::RotateOptions;
use core::config::RotateConfig;
use core::error::{RotateError, print_error};

/// Release the "next release" placeholder version in Mantis and create a new one
///
/// Every input can also come from the environment the way workflow actions pass
/// them (`INPUT_URL`, `INPUT_API-KEY`, ...).
#[derive(Parser)]
#[command(name = "mantis-rotate")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Base URL of the Mantis instance (e.g. https://example.mantishub.io)
  #[arg(long, env = "INPUT_URL")]
  url: Option<String>,

  /// API token sent in the Authorization header
  #[arg(long, env = "INPUT_API-KEY", hide_env_values = true)]
  api_key: Option<String>,

  /// Name of the project whose versions are rotated
  #[arg(long, env = "INPUT_PROJECT")]
  project: Option<String>,

  /// Name given to the placeholder version when it is released (e.g. the tag)
  #[arg(long, env = "INPUT_RELEASE-NAME")]
  release_name: Option<String>,

  /// Name of the rolling placeholder version (e.g. vNext)
  #[arg(long, env = "INPUT_PLACEHOLDER-NAME")]
  placeholder_name: Option<String>,

  /// Days from today for the new placeholder's date
  #[arg(long, env = "INPUT_NEXT-RELEASE-IN-DAYS", allow_hyphen_values = true)]
  next_release_in_days: Option<String>,

  /// Resolve the project and placeholder, but only print the writes
  #[arg(long)]
  dry_run: bool,

  /// Print the rotation outcome as JSON
  #[arg(long)]
  json: bool,

  /// Enable debug logging (overridden by RUST_LOG)
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn into_parts(self) -> (RotateConfig, RotateOptions) {
    let config = RotateConfig {
      url: self.url,
      api_key: self.api_key,
      project: self.project,
      release_name: self.release_name,
      placeholder_name: self.placeholder_name,
      next_release_in_days: self.next_release_in_days,
    };
    let options = RotateOptions {
      dry_run: self.dry_run,
      json: self.json,
    };
    (config, options)
  }
}

fn get_styles() -> clap::builder::Styles {
  let heading = anstyle::Style::new()
    .bold()
    .underline()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));

  clap::builder::Styles::styled()
    .usage(heading)
    .header(heading)
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  ui::logging::init(cli.verbose);

  let (config, options) = cli.into_parts();
  if let Err(err) = commands::run_rotate(config, options) {
    handle_error(err);
  }
}

fn handle_error(err: RotateError) -> ! {
  tracing::debug!(error = ?err, "Run failed");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
