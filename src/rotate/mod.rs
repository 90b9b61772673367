//! Version rotation
//!
//! One run is a straight line with no loops and no retries:
//!
//! 1. resolve the project id by name
//! 2. look up the placeholder version (it may not exist yet)
//! 3. if it exists, rename it to the release name, mark it released, date it today
//! 4. create a new placeholder dated `today + N` days
//!
//! Any failing step ends the run. A failure in step 4 after step 3 succeeded leaves
//! the tracker with the release marked and no new placeholder; nothing is rolled back.

pub mod resolve;

use crate::core::config::RotationPlan;
use crate::core::dates::{add_days, format_date};
use crate::core::error::RotateResult;
use crate::tracker::{NewVersion, Tracker, Version, VersionUpdate};
use chrono::NaiveDate;
use resolve::{find_version_id, resolve_project_id};
use serde::Serialize;

/// What a rotation did (or, in dry-run mode, would do)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationOutcome {
  pub project_id: u64,
  /// Id of the placeholder found before rotating
  pub placeholder_id: Option<u64>,
  /// PATCH body sent to the placeholder, if one existed
  pub update: Option<VersionUpdate>,
  /// POST body for the new placeholder
  pub create: NewVersion,
  /// Version as returned by the tracker after the update
  pub released: Option<Version>,
  /// New placeholder as returned by the tracker; `None` in dry-run mode
  pub created: Option<Version>,
  pub dry_run: bool,
}

impl RotationOutcome {
  /// Id of the newly created placeholder
  pub fn version_id(&self) -> Option<u64> {
    self.created.as_ref().map(|v| v.id)
  }
}

/// Run one rotation against `tracker`
///
/// `today` is the release date; the new placeholder is dated
/// `today + plan.next_release_in_days`. With `dry_run` the two read calls still
/// happen but nothing is written.
pub async fn rotate<T: Tracker>(
  tracker: &T,
  plan: &RotationPlan,
  today: NaiveDate,
  dry_run: bool,
) -> RotateResult<RotationOutcome> {
  let released_on = format_date(today);
  let next_release_on = add_days(today, plan.next_release_in_days)?;

  let projects = tracker.list_projects().await?;
  let project_id = resolve_project_id(&projects, &plan.project)?;
  tracing::info!(project = %plan.project, project_id, "Resolved project");

  let versions = tracker.list_versions(project_id).await?;
  let placeholder_id = find_version_id(&versions, project_id, &plan.placeholder_name)?;

  let update = placeholder_id.map(|_| VersionUpdate::release(plan.release_name.as_str(), released_on.as_str()));
  let create = NewVersion::placeholder(plan.placeholder_name.as_str(), next_release_on.as_str());

  if dry_run {
    match (placeholder_id, &update) {
      (Some(version_id), Some(update)) => tracing::info!(
        version_id,
        name = %update.name,
        timestamp = %update.timestamp,
        "[dry-run] Would release placeholder"
      ),
      _ => tracing::info!(placeholder = %plan.placeholder_name, "[dry-run] No placeholder to release"),
    }
    tracing::info!(name = %create.name, timestamp = %create.timestamp, "[dry-run] Would create placeholder");

    return Ok(RotationOutcome {
      project_id,
      placeholder_id,
      update,
      create,
      released: None,
      created: None,
      dry_run: true,
    });
  }

  let released = match (placeholder_id, &update) {
    (Some(version_id), Some(update)) => {
      let version = tracker.update_version(project_id, version_id, update).await?;
      tracing::info!(version_id, name = %version.name, "Released placeholder version");
      Some(version)
    }
    _ => {
      tracing::info!(placeholder = %plan.placeholder_name, "No placeholder version found, skipping release step");
      None
    }
  };

  let created = match tracker.create_version(project_id, &create).await {
    Ok(version) => version,
    Err(err) => {
      if let Some(version) = &released {
        tracing::error!(
          version_id = version.id,
          name = %version.name,
          "Version was already released but the new placeholder could not be created"
        );
      }
      return Err(err);
    }
  };
  tracing::info!(version_id = created.id, name = %created.name, timestamp = %create.timestamp, "Created placeholder version");

  Ok(RotationOutcome {
    project_id,
    placeholder_id,
    update,
    create,
    released,
    created: Some(created),
    dry_run: false,
  })
}
