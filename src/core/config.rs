//! Run configuration for mantis-rotate
//!
//! [`RotateConfig`] holds the six raw inputs exactly as the pipeline supplied them.
//! [`RotateConfig::validate`] turns them into a [`RotationPlan`] before any request
//! is made.

use crate::core::error::{ConfigError, RotateResult};
use reqwest::Url;
use std::fmt;

/// Raw inputs for one rotation run
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RotateConfig {
  pub url: Option<String>,
  pub api_key: Option<String>,
  pub project: Option<String>,
  pub release_name: Option<String>,
  pub placeholder_name: Option<String>,
  pub next_release_in_days: Option<String>,
}

// Hand-written so the API key never reaches the logs.
impl fmt::Debug for RotateConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RotateConfig")
      .field("url", &self.url)
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("project", &self.project)
      .field("release_name", &self.release_name)
      .field("placeholder_name", &self.placeholder_name)
      .field("next_release_in_days", &self.next_release_in_days)
      .finish()
  }
}

/// Validated inputs, ready to drive a rotation
#[derive(Clone, PartialEq, Eq)]
pub struct RotationPlan {
  /// Tracker root without a trailing slash
  pub base_url: String,
  pub api_key: String,
  pub project: String,
  pub release_name: String,
  pub placeholder_name: String,
  pub next_release_in_days: i64,
}

impl fmt::Debug for RotationPlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RotationPlan")
      .field("base_url", &self.base_url)
      .field("api_key", &"<redacted>")
      .field("project", &self.project)
      .field("release_name", &self.release_name)
      .field("placeholder_name", &self.placeholder_name)
      .field("next_release_in_days", &self.next_release_in_days)
      .finish()
  }
}

impl RotateConfig {
  /// Check every input and produce the plan for this run
  ///
  /// Inputs are checked in a fixed order so the first reported problem is stable:
  /// presence of all six, then the day count, then the URL.
  pub fn validate(&self) -> RotateResult<RotationPlan> {
    let url = required(&self.url, "url")?;
    let api_key = required(&self.api_key, "api-key")?;
    let project = required(&self.project, "project")?;
    let release_name = required(&self.release_name, "release-name")?;
    let placeholder_name = required(&self.placeholder_name, "placeholder-name")?;
    let days = required(&self.next_release_in_days, "next-release-in-days")?;

    let next_release_in_days = parse_days(days)?;
    let base_url = parse_base_url(url.trim())?;

    Ok(RotationPlan {
      base_url,
      api_key: api_key.trim().to_string(),
      project: project.to_string(),
      release_name: release_name.to_string(),
      placeholder_name: placeholder_name.to_string(),
      next_release_in_days,
    })
  }
}

/// Present and non-blank after trimming; the value itself is returned as configured
fn required<'a>(value: &'a Option<String>, field: &'static str) -> RotateResult<&'a str> {
  match value.as_deref() {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(ConfigError::MissingField { field }.into()),
  }
}

/// Any finite number; the fractional part is dropped (`1.5` → 1, `-1.5` → -1)
fn parse_days(raw: &str) -> RotateResult<i64> {
  let raw = raw.trim();
  let invalid = |reason: String| ConfigError::InvalidField {
    field: "next-release-in-days",
    reason,
  };

  let value = raw
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .ok_or_else(|| invalid(format!("'{}' is not a number", raw)))?
    .trunc();

  // i64::MAX as f64 rounds up to 2^63, which is already out of range
  if value < i64::MIN as f64 || value >= i64::MAX as f64 {
    return Err(invalid(format!("'{}' is out of range", raw)).into());
  }

  Ok(value as i64)
}

fn parse_base_url(raw: &str) -> RotateResult<String> {
  let invalid = |reason: String| ConfigError::InvalidField { field: "url", reason };

  let parsed = Url::parse(raw).map_err(|e| invalid(format!("'{}' is not a valid URL ({})", raw, e)))?;
  if !matches!(parsed.scheme(), "http" | "https") {
    return Err(invalid(format!("'{}' must use http or https", raw)).into());
  }

  Ok(raw.trim_end_matches('/').to_string())
}
