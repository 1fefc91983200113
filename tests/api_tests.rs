mod common;

use reqwest::StatusCode;

use common::{FakeStore, ids, live_repository, project, unconfigured_repository};

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Projects ────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_config_serves_fallback() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["degraded"], true);
    assert!(body["error"].as_str().unwrap().contains("SUPABASE_URL"));
    assert_eq!(body["projects"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn list_filters_fallback_by_category() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/projects?category=marley").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["projects"]), vec!["5", "6", "7", "8"]);
}

#[tokio::test]
async fn list_category_all_returns_everything() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, _) = app.get_json("/api/v1/projects?category=all&limit=3").await;
    assert_eq!(ids(&body["projects"]), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn list_search_matches_title_or_description() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, _) = app.get_json("/api/v1/projects?search=JINGLE").await;
    assert_eq!(ids(&body["projects"]), vec!["8"]);

    let (body, _) = app.get_json("/api/v1/projects?search=eventbrite").await;
    assert_eq!(ids(&body["projects"]), vec!["5"]);
}

#[tokio::test]
async fn list_search_matches_tags() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/projects?search=qr-code").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["projects"]), vec!["5"]);
}

#[tokio::test]
async fn list_live_orders_rows() {
    let store = FakeStore::with_rows(vec![
        project("c", "aria", 3, false),
        project("a", "aria", 1, false),
        project("b", "aria", 2, false),
    ]);
    let app = common::spawn_app(live_repository(store)).await;

    let (body, status) = app.get_json("/api/v1/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(body["degraded"], false);
    assert!(body["error"].is_null());
    assert_eq!(ids(&body["projects"]), vec!["a", "b", "c"]);
    assert_eq!(body["projects"][0]["status"], "active");
}

#[tokio::test]
async fn list_store_failure_is_not_an_http_error() {
    let app = common::spawn_app(live_repository(FakeStore::failing("upstream 502"))).await;

    let (body, status) = app.get_json("/api/v1/projects?featured=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(body["error"].as_str().unwrap().contains("upstream 502"));
    assert_eq!(ids(&body["projects"]), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn list_rejects_unknown_status() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/projects?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("archived"));
}

#[tokio::test]
async fn get_single_project() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/projects/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["title"], "ARIA MARKET");
    assert_eq!(body["source"], "fallback");

    let (_, status) = app.get_json("/api/v1/projects/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Diagnostics ─────────────────────────────────────────────────

#[tokio::test]
async fn connection_without_config_fails_fast() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, status) = app.get_json("/api/v1/connection").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn connection_reports_count() {
    let store = FakeStore::with_rows(vec![project("a", "aria", 1, true), project("b", "aria", 2, true)]);
    let app = common::spawn_app(live_repository(store.clone())).await;

    let (body, _) = app.get_json("/api/v1/connection").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(store.counts(), 1);
}

#[tokio::test]
async fn diagnostics_start_idle_and_run_to_success() {
    let store = FakeStore::with_rows(vec![project("a", "aria", 1, true)]);
    let app = common::spawn_app(live_repository(store.clone())).await;

    let (body, _) = app.get_json("/api/v1/diagnostics").await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["configured"], true);

    let (body, status) = app.post_json("/api/v1/diagnostics/run").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "success");
    assert_eq!(body["project_count"], 1);
    assert!(body["checked_at"].is_string());

    // Retry re-enters testing and finishes again
    let (body, _) = app.post_json("/api/v1/diagnostics/run").await;
    assert_eq!(body["state"], "success");
    assert_eq!(store.counts(), 2);
    assert_eq!(store.fetches(), 2);
}

#[tokio::test]
async fn diagnostics_run_errors_when_store_down() {
    let store = FakeStore::failing("no route to host");
    let app = common::spawn_app(live_repository(store.clone())).await;

    let (body, _) = app.post_json("/api/v1/diagnostics/run").await;
    assert_eq!(body["state"], "error");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Connection test failed:"));
    // The fetch step is skipped once the connection test fails
    assert_eq!(store.fetches(), 0);

    let (body, _) = app.get_json("/api/v1/diagnostics").await;
    assert_eq!(body["state"], "error");
}

#[tokio::test]
async fn diagnostics_without_config_error_out() {
    let app = common::spawn_app(unconfigured_repository()).await;

    let (body, _) = app.post_json("/api/v1/diagnostics/run").await;
    assert_eq!(body["state"], "error");
    assert_eq!(body["configured"], false);
}
