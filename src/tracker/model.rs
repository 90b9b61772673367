//! Wire types for the Mantis REST API
//!
//! Only the fields the rotation reads or writes are modelled; anything else in the
//! tracker's responses is ignored.

use serde::{Deserialize, Serialize};

/// A tracker project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id: u64,
  pub name: String,
}

/// `GET /api/rest/projects`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectList {
  #[serde(default)]
  pub projects: Option<Vec<Project>>,
}

/// A project version (release)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub released: bool,
  #[serde(default)]
  pub obsolete: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// `GET /api/rest/projects/{id}/versions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionList {
  #[serde(default)]
  pub versions: Option<Vec<Version>>,
}

/// Body for `PATCH /api/rest/projects/{id}/versions/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionUpdate {
  pub name: String,
  pub released: bool,
  pub timestamp: String,
}

impl VersionUpdate {
  /// Mark a version released under `name` on `date`
  pub fn release(name: impl Into<String>, date: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      released: true,
      timestamp: date.into(),
    }
  }
}

/// Body for `POST /api/rest/projects/{id}/versions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVersion {
  pub name: String,
  pub released: bool,
  pub obsolete: bool,
  pub timestamp: String,
}

impl NewVersion {
  /// An unreleased, non-obsolete placeholder dated `date`
  pub fn placeholder(name: impl Into<String>, date: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      released: false,
      obsolete: false,
      timestamp: date.into(),
    }
  }
}

/// Version returned by create/update
///
/// Mantis wraps it as `{"version": {...}}`; some deployments answer with the bare
/// object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionEnvelope {
  Wrapped { version: Version },
  Bare(Version),
}

impl VersionEnvelope {
  pub fn into_version(self) -> Version {
    match self {
      VersionEnvelope::Wrapped { version } | VersionEnvelope::Bare(version) => version,
    }
  }
}
