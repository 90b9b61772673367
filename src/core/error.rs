//! Error types for mantis-rotate with contextual messages and exit codes
//!
//! Every failure in a run ends up as a [`RotateError`]. Library code returns it up
//! the call chain; only `main` turns it into a process exit code.

use std::fmt;
use std::io;

/// Exit codes for mantis-rotate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Any validation, resolution or request failure
  Failure = 1,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for mantis-rotate
#[derive(Debug)]
pub enum RotateError {
  /// Missing or invalid inputs
  Config(ConfigError),

  /// Project or version lookups that came back empty
  Resolve(ResolveError),

  /// Tracker REST API failures
  Api(ApiError),

  /// I/O errors (step output file)
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RotateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RotateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RotateError::Message { message, context, help } => RotateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => RotateError::Message {
        message: ctx_str,
        context: Some(other.to_string()),
        help: other.help_message(),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RotateError::Config(e) => e.help_message(),
      RotateError::Resolve(e) => e.help_message(),
      RotateError::Api(e) => e.help_message(),
      RotateError::Message { help, .. } => help.clone(),
      RotateError::Io(_) => None,
    }
  }
}

impl fmt::Display for RotateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RotateError::Config(e) => write!(f, "{}", e),
      RotateError::Resolve(e) => write!(f, "{}", e),
      RotateError::Api(e) => write!(f, "{}", e),
      RotateError::Io(e) => write!(f, "I/O error: {}", e),
      RotateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RotateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RotateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RotateError {
  fn from(err: io::Error) -> Self {
    RotateError::Io(err)
  }
}

impl From<ConfigError> for RotateError {
  fn from(err: ConfigError) -> Self {
    RotateError::Config(err)
  }
}

impl From<ResolveError> for RotateError {
  fn from(err: ResolveError) -> Self {
    RotateError::Resolve(err)
  }
}

impl From<ApiError> for RotateError {
  fn from(err: ApiError) -> Self {
    RotateError::Api(err)
  }
}

impl From<serde_json::Error> for RotateError {
  fn from(err: serde_json::Error) -> Self {
    RotateError::message(format!("JSON error: {}", err))
  }
}

/// Input validation errors
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
  /// Required input absent or blank
  MissingField { field: &'static str },

  /// Input present but unusable
  InvalidField { field: &'static str, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingField { field } => Some(format!(
        "Pass --{} or set the `{}` workflow input.",
        field,
        field
      )),
      ConfigError::InvalidField { field, .. } if *field == "next-release-in-days" => {
        Some("Use a number of days, e.g. `next-release-in-days: 30`.".to_string())
      }
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingField { field } => write!(f, "Missing required input: {}", field),
      ConfigError::InvalidField { field, reason } => write!(f, "Invalid {}: {}", field, reason),
    }
  }
}

/// Lookup failures against the tracker's project and version lists
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
  /// Project list absent or empty
  NoProjects,

  /// No project with exactly this name
  ProjectNotFound { name: String },

  /// Version list absent or empty
  NoVersions { project_id: u64 },
}

impl ResolveError {
  fn help_message(&self) -> Option<String> {
    match self {
      ResolveError::NoProjects => {
        Some("Check that the API token belongs to a user with access to at least one project.".to_string())
      }
      ResolveError::ProjectNotFound { .. } => {
        Some("Project names are matched exactly, including case.".to_string())
      }
      ResolveError::NoVersions { .. } => {
        Some("Create the placeholder version once in the tracker before the first rotation.".to_string())
      }
    }
  }
}

impl fmt::Display for ResolveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolveError::NoProjects => write!(f, "Tracker returned no projects"),
      ResolveError::ProjectNotFound { name } => write!(f, "Project with name \"{}\" not found", name),
      ResolveError::NoVersions { project_id } => write!(f, "Project {} has no versions", project_id),
    }
  }
}

/// Tracker REST API errors
#[derive(Debug)]
pub enum ApiError {
  /// Connection, TLS or body read failure
  Transport {
    method: String,
    url: String,
    message: String,
  },

  /// Non-2xx response
  Status {
    method: String,
    url: String,
    status: u16,
    body: String,
  },

  /// 2xx response whose body is not the expected JSON
  Decode { url: String, message: String, body: String },
}

impl ApiError {
  /// HTTP status of a rejected request, if the server answered at all
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }

  fn help_message(&self) -> Option<String> {
    match (self, self.status()) {
      (_, Some(401 | 403)) => Some("The tracker rejected the API token. Check the `api-key` input.".to_string()),
      (_, Some(404)) => Some("Check that `url` points at the tracker root (the part before /api/rest).".to_string()),
      (ApiError::Transport { .. }, _) => Some("Check that the tracker URL is reachable from this runner.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Transport { method, url, message } => {
        write!(f, "{} {} failed: {}", method, url, message)
      }
      ApiError::Status {
        method,
        url,
        status,
        body,
      } => {
        write!(f, "{} {} failed with status code {}", method, url, status)?;
        if !body.is_empty() {
          write!(f, "\nResponse body: {}", body)?;
        }
        Ok(())
      }
      ApiError::Decode { url, message, body } => {
        write!(f, "Unexpected response from {}: {}\nResponse body: {}", url, message, body)
      }
    }
  }
}

/// Result type alias for mantis-rotate
pub type RotateResult<T> = Result<T, RotateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RotateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RotateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RotateError>,
{
  fn context(self, ctx: impl Into<String>) -> RotateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RotateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RotateError) {
  eprintln!("\n❌ Failed to rotate version: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
