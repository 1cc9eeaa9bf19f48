//! End-to-end tests driving the axum router without a network socket.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use outage_schedule::db::{FullRepository, LocalRepository};
use outage_schedule::http::{create_router, AppState};
use support::{BASE_TABLE, CHANGES};

fn app_with(repo: LocalRepository) -> Router {
    let repo: Arc<dyn FullRepository> = Arc::new(repo);
    create_router(AppState::new(repo))
}

fn app() -> Router {
    app_with(LocalRepository::new())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_blocks(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/v1/blocks")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn blocks_body() -> Value {
    json!({
        "blocks": [
            {"date": "2026-01-15", "schedule_text": BASE_TABLE, "extras_text": CHANGES},
            {"date": "2026-01-16", "schedule_text": BASE_TABLE}
        ]
    })
}

/// Test health reports the database state
#[tokio::test]
async fn test_health() {
    let repo = LocalRepository::new();
    let app = app_with(repo.clone());

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["database"], "disconnected");
}

/// Test status on an empty store
#[tokio::test]
async fn test_status_empty() {
    let (status, body) = get(&app(), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["total_queues"], 12);
    assert_eq!(body["available_dates"], json!([]));
    assert!(body["last_scrape"].is_null());
}

/// Test ingesting blocks and reading them back
#[tokio::test]
async fn test_ingest_then_query() {
    let app = app();

    let (status, body) = post_blocks(&app, blocks_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["dates"], json!(["2026-01-15", "2026-01-16"]));
    assert_eq!(body["message"], "Оновлено графіки для 2 дат");
    assert!(body["last_updated"].is_string());

    let (_, body) = get(&app, "/v1/dates").await;
    assert_eq!(body["dates"], json!(["2026-01-16", "2026-01-15"]));

    let (status, body) = get(&app, "/v1/schedule/1.1/2026-01-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["queue"], "1.1");
    assert_eq!(body["status"], "active");
    assert_eq!(
        body["intervals"],
        json!([{"start": "09:00", "end": "15:00", "type": "base"}])
    );
    assert_eq!(body["total_hours_off"], 6.0);
    assert!(body["operational_message"]
        .as_str()
        .unwrap()
        .starts_with("Оперативні зміни"));
}

/// Test overnight intervals count toward the hours figure
#[tokio::test]
async fn test_overnight_hours() {
    let app = app();
    post_blocks(&app, blocks_body()).await;

    let (_, body) = get(&app, "/v1/schedule/2.2/2026-01-16").await;
    assert_eq!(
        body["intervals"],
        json!([{"start": "23:00", "end": "02:00", "type": "base"}])
    );
    assert_eq!(body["total_hours_off"], 3.0);
    assert!(body["operational_message"].is_null());
}

/// Test a date without data reports no_data
#[tokio::test]
async fn test_schedule_no_data() {
    let (status, body) = get(&app(), "/v1/schedule/3.2/2026-01-20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "no_data");
    assert_eq!(body["intervals"], json!([]));
    assert_eq!(body["total_hours_off"], 0.0);
}

/// Test the day query parameter on the today endpoint
#[tokio::test]
async fn test_schedule_day_query() {
    let app = app();
    post_blocks(&app, blocks_body()).await;

    let (status, body) = get(&app, "/v1/schedule/2.1?day=2026-01-16").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2026-01-16");
    assert_eq!(body["total_hours_off"], 8.0);
}

/// Test the today endpoint defaults to the current Kyiv date
#[tokio::test]
async fn test_schedule_today() {
    let (status, body) = get(&app(), "/v1/schedule/1.1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["date"],
        outage_schedule::services::today().to_string()
    );
}

/// Test all queues for a date
#[tokio::test]
async fn test_all_schedules() {
    let app = app();
    post_blocks(&app, blocks_body()).await;

    let (status, body) = get(&app, "/v1/all/2026-01-15").await;
    assert_eq!(status, StatusCode::OK);

    let queues = body["queues"].as_object().unwrap();
    assert_eq!(queues.len(), 5);
    assert_eq!(queues["2.1"]["total_hours_off"], 8.0);
    assert_eq!(queues["1.2"]["intervals"].as_array().unwrap().len(), 2);
    assert!(!queues.contains_key("6.2"));
}

/// Test invalid queue and date inputs
#[tokio::test]
async fn test_invalid_input_rejected() {
    let app = app();

    let (status, body) = get(&app, "/v1/schedule/7.1/2026-01-15").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(
        body["message"],
        "Невірний формат черги. Використовуйте: 1.1 - 6.2"
    );

    let (status, body) = get(&app, "/v1/schedule/1.1/2026-1-5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Невірний формат дати. Використовуйте: YYYY-MM-DD"
    );

    let (status, _) = get(&app, "/v1/all/2026-02-30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Test a batch with nothing recognizable
#[tokio::test]
async fn test_ingest_nothing_to_save() {
    let app = app();
    let body = json!({
        "blocks": [{"date": "2026-01-15", "schedule_text": "Відключень не заплановано"}]
    });

    let (status, body) = post_blocks(&app, body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NOTHING_TO_SAVE");

    let (_, body) = get(&app, "/v1/dates").await;
    assert_eq!(body["dates"], json!([]));
}

/// Test malformed request bodies are rejected by the extractor
#[tokio::test]
async fn test_ingest_malformed_body() {
    let app = app();
    let request = Request::post("/v1/blocks")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"blocks": [{"date": "not-a-date"}]}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}
