//! HTTP client for the Mantis REST API
//!
//! Every request carries the API token in a raw `Authorization` header (Mantis does
//! not use the `Bearer` scheme) and `Content-Type: application/json`. Any non-2xx
//! answer is an error carrying the status and the response body. There is no retry
//! and no timeout.

use super::Tracker;
use super::model::{NewVersion, ProjectList, Version, VersionEnvelope, VersionList, VersionUpdate};
use crate::core::config::RotationPlan;
use crate::core::error::{ApiError, ConfigError, RotateError, RotateResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Mantis REST API client
#[derive(Debug, Clone)]
pub struct MantisClient {
  http: Client,
  base_url: String,
}

impl MantisClient {
  /// Create a client for the tracker at `base_url` authenticating with `api_key`
  pub fn new(base_url: &str, api_key: &str) -> RotateResult<Self> {
    let mut auth = HeaderValue::from_str(api_key).map_err(|_| ConfigError::InvalidField {
      field: "api-key",
      reason: "contains characters that cannot be sent in an HTTP header".to_string(),
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let http = Client::builder()
      .default_headers(headers)
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| RotateError::message(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Create a client from a validated plan
  pub fn from_plan(plan: &RotationPlan) -> RotateResult<Self> {
    Self::new(&plan.base_url, &plan.api_key)
  }

  /// Absolute URL for a path under `/api/rest`
  pub fn endpoint(&self, path: &str) -> String {
    format!("{}/api/rest/{}", self.base_url, path.trim_start_matches('/'))
  }

  /// Send one request and return the raw body of a 2xx response
  pub async fn request<B>(&self, method: Method, url: &str, body: Option<&B>) -> RotateResult<String>
  where
    B: Serialize + ?Sized,
  {
    tracing::info!(%method, %url, "Making request");

    let mut builder = self.http.request(method.clone(), url);
    if let Some(body) = body {
      builder = builder.body(serde_json::to_vec(body)?);
    }

    let transport = |e: reqwest::Error| ApiError::Transport {
      method: method.to_string(),
      url: url.to_string(),
      message: e.to_string(),
    };

    let response = builder.send().await.map_err(transport)?;
    let status = response.status();
    let text = response.text().await.map_err(transport)?;

    if !status.is_success() {
      tracing::warn!(%method, %url, status = status.as_u16(), "Request failed");
      return Err(
        ApiError::Status {
          method: method.to_string(),
          url: url.to_string(),
          status: status.as_u16(),
          body: text,
        }
        .into(),
      );
    }

    tracing::debug!(%url, status = status.as_u16(), body = %text, "Response received");
    Ok(text)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RotateResult<T> {
    let url = self.endpoint(path);
    let text = self.request::<()>(Method::GET, &url, None).await?;
    decode(&url, &text)
  }

  async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> RotateResult<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = self.endpoint(path);
    let text = self.request(method, &url, Some(body)).await?;
    decode(&url, &text)
  }
}

fn decode<T: DeserializeOwned>(url: &str, text: &str) -> RotateResult<T> {
  serde_json::from_str(text).map_err(|e| {
    ApiError::Decode {
      url: url.to_string(),
      message: e.to_string(),
      body: text.to_string(),
    }
    .into()
  })
}

impl Tracker for MantisClient {
  async fn list_projects(&self) -> RotateResult<ProjectList> {
    self.get_json("projects").await
  }

  async fn list_versions(&self, project_id: u64) -> RotateResult<VersionList> {
    self.get_json(&format!("projects/{}/versions", project_id)).await
  }

  async fn update_version(&self, project_id: u64, version_id: u64, update: &VersionUpdate) -> RotateResult<Version> {
    let path = format!("projects/{}/versions/{}", project_id, version_id);
    let envelope: VersionEnvelope = self.send_json(Method::PATCH, &path, update).await?;
    Ok(envelope.into_version())
  }

  async fn create_version(&self, project_id: u64, version: &NewVersion) -> RotateResult<Version> {
    let path = format!("projects/{}/versions", project_id);
    let envelope: VersionEnvelope = self.send_json(Method::POST, &path, version).await?;
    Ok(envelope.into_version())
  }
}
