//! Access to the Mantis tracker
//!
//! The rotation only needs four remote operations. They sit behind the [`Tracker`]
//! trait so the orchestration can run against [`MantisClient`] in production and an
//! in-memory fake in tests.

pub mod client;
pub mod model;

pub use client::MantisClient;
pub use model::{NewVersion, ProjectList, Version, VersionList, VersionUpdate};

use crate::core::error::RotateResult;

/// Remote operations the rotation depends on
#[allow(async_fn_in_trait)]
pub trait Tracker {
  /// All projects visible to the API token
  async fn list_projects(&self) -> RotateResult<ProjectList>;

  /// All versions of one project
  async fn list_versions(&self, project_id: u64) -> RotateResult<VersionList>;

  /// Apply a partial update to an existing version
  async fn update_version(&self, project_id: u64, version_id: u64, update: &VersionUpdate) -> RotateResult<Version>;

  /// Create a version in a project
  async fn create_version(&self, project_id: u64, version: &NewVersion) -> RotateResult<Version>;
}
