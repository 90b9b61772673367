//! Name → id lookups over the tracker's project and version lists
//!
//! Matching is exact and case-sensitive. The first match wins.

use crate::core::error::{ResolveError, RotateResult};
use crate::tracker::{ProjectList, VersionList};

/// Id of the project called exactly `name`
pub fn resolve_project_id(list: &ProjectList, name: &str) -> RotateResult<u64> {
  let projects = match list.projects.as_deref() {
    Some(projects) if !projects.is_empty() => projects,
    _ => return Err(ResolveError::NoProjects.into()),
  };

  projects
    .iter()
    .find(|p| p.name == name)
    .map(|p| p.id)
    .ok_or_else(|| ResolveError::ProjectNotFound { name: name.to_string() }.into())
}

/// Id of the version called exactly `name`, or `None` if the project has no such version
///
/// An absent or empty version list is an error, not `None`.
pub fn find_version_id(list: &VersionList, project_id: u64, name: &str) -> RotateResult<Option<u64>> {
  let versions = match list.versions.as_deref() {
    Some(versions) if !versions.is_empty() => versions,
    _ => return Err(ResolveError::NoVersions { project_id }.into()),
  };

  Ok(versions.iter().find(|v| v.name == name).map(|v| v.id))
}
