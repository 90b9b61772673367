//! Integration tests for successful rotations

use crate::helpers::{API_KEY, TestTracker, date_in, run_async, stderr, stdout};
use anyhow::Result;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn demo_tracker(versions: Value) -> Result<TestTracker> {
  let tracker = TestTracker::start().await?;
  tracker
    .with_projects(json!([{"id": 3, "name": "Other"}, {"id": 7, "name": "Demo"}]))
    .await;
  tracker.with_versions(7, versions).await;
  Ok(tracker)
}

async fn expect_create(tracker: &TestTracker, days: u64, new_id: u64) {
  Mock::given(method("POST"))
    .and(path("/api/rest/projects/7/versions"))
    .and(header("Authorization", API_KEY))
    .and(header("Content-Type", "application/json"))
    .and(body_json(json!({
      "name": "vNext",
      "released": false,
      "obsolete": false,
      "timestamp": date_in(days),
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "version": {"id": new_id, "name": "vNext", "released": false, "obsolete": false, "timestamp": date_in(days)}
    })))
    .expect(1)
    .mount(&tracker.server)
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_releases_placeholder_and_creates_next() -> Result<()> {
  let tracker = demo_tracker(json!([
    {"id": 54, "name": "v1.1.0", "released": true},
    {"id": 55, "name": "vNext", "released": false}
  ]))
  .await?;

  Mock::given(method("PATCH"))
    .and(path("/api/rest/projects/7/versions/55"))
    .and(header("Authorization", API_KEY))
    .and(body_json(json!({"name": "v1.2.0", "released": true, "timestamp": date_in(0)})))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "version": {"id": 55, "name": "v1.2.0", "released": true, "obsolete": false}
    })))
    .expect(1)
    .mount(&tracker.server)
    .await;
  expect_create(&tracker, 30, 56).await;

  let output = run_async(
    Some(tracker.output_path.clone()),
    tracker.args("Demo", "v1.2.0", "vNext", "30"),
    vec![],
  )
  .await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(tracker.read_output()?, "version-id=56\n");
  assert_eq!(
    tracker.requests().await,
    vec![
      "GET /api/rest/projects",
      "GET /api/rest/projects/7/versions",
      "PATCH /api/rest/projects/7/versions/55",
      "POST /api/rest/projects/7/versions",
    ]
  );

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_placeholder_only_creates() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 54, "name": "v1.1.0", "released": true}])).await?;

  Mock::given(method("PATCH"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&tracker.server)
    .await;
  expect_create(&tracker, 30, 56).await;

  let output = run_async(
    Some(tracker.output_path.clone()),
    tracker.args("Demo", "v1.2.0", "vNext", "30"),
    vec![],
  )
  .await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(tracker.read_output()?, "version-id=56\n");
  assert!(stderr(&output).contains("No placeholder version found"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inputs_from_workflow_environment() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 54, "name": "v1.1.0"}])).await?;
  expect_create(&tracker, 14, 60).await;

  let env = vec![
    ("INPUT_URL", tracker.url()),
    ("INPUT_API-KEY", API_KEY.to_string()),
    ("INPUT_PROJECT", "Demo".to_string()),
    ("INPUT_RELEASE-NAME", "v2.0.0".to_string()),
    ("INPUT_PLACEHOLDER-NAME", "vNext".to_string()),
    ("INPUT_NEXT-RELEASE-IN-DAYS", "14".to_string()),
  ];
  let output = run_async(Some(tracker.output_path.clone()), vec![], env).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(tracker.read_output()?, "version-id=60\n");

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_legacy_set_output_without_output_file() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 54, "name": "v1.1.0"}])).await?;
  expect_create(&tracker, 30, 61).await;

  let output = run_async(None, tracker.args("Demo", "v1.2.0", "vNext", "30"), vec![]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(stdout(&output).trim(), "::set-output name=version-id::61");

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_report_stays_parseable_without_output_file() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 54, "name": "v1.1.0"}])).await?;
  expect_create(&tracker, 30, 61).await;

  let mut args = tracker.args("Demo", "v1.2.0", "vNext", "30");
  args.push("--json".to_string());
  let output = run_async(None, args, vec![]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let report: Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["created"]["id"], 61);
  assert!(!stdout(&output).contains("::set-output"));
  assert!(stderr(&output).contains("::set-output name=version-id::61"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_sends_no_writes() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 55, "name": "vNext"}])).await?;
  Mock::given(method("PATCH"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&tracker.server)
    .await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&tracker.server)
    .await;

  let mut args = tracker.args("Demo", "v1.2.0", "vNext", "30");
  args.push("--dry-run".to_string());
  let output = run_async(Some(tracker.output_path.clone()), args, vec![]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(tracker.read_output()?, "", "dry run must not publish a version id");
  assert!(stderr(&output).contains("[dry-run] Would release placeholder"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_report() -> Result<()> {
  let tracker = demo_tracker(json!([{"id": 55, "name": "vNext"}])).await?;
  Mock::given(method("PATCH"))
    .and(path("/api/rest/projects/7/versions/55"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "version": {"id": 55, "name": "v1.2.0", "released": true}
    })))
    .mount(&tracker.server)
    .await;
  expect_create(&tracker, 30, 56).await;

  let mut args = tracker.args("Demo", "v1.2.0", "vNext", "30");
  args.push("--json".to_string());
  let output = run_async(Some(tracker.output_path.clone()), args, vec![]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let report: Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["project_id"], 7);
  assert_eq!(report["placeholder_id"], 55);
  assert_eq!(report["released"]["name"], "v1.2.0");
  assert_eq!(report["created"]["id"], 56);
  assert_eq!(report["create"]["timestamp"], date_in(30));
  assert_eq!(report["dry_run"], false);

  Ok(())
}
