//! End-to-end tests for the HTTP surface
//!
//! Only wiring is verified here; aggregation correctness is covered by the
//! store and aggregate unit tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tower::ServiceExt;
use txstats::infrastructure::api::{router, AppState};
use txstats::infrastructure::MetricsCollector;
use txstats::store::WindowStore;

fn test_app() -> Router {
    let state = AppState {
        store: Arc::new(WindowStore::with_system_clock(Duration::from_secs(60))),
        metrics: Arc::new(MetricsCollector::new()),
    };
    router(state)
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

fn post_transaction(amount: f64, timestamp: i64) -> Request<Body> {
    Request::post("/transactions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            "{{\"amount\": {}, \"timestamp\": {}}}",
            amount, timestamp
        )))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn post_transaction_created() {
    let app = test_app();

    let (status, _) = send(app, post_transaction(12.1, now_millis())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn post_transaction_invalid_json() {
    let app = test_app();

    let req = Request::post("/transactions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("foobar"))
        .unwrap();
    let (status, _) = send(app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_statistics_empty() {
    let app = test_app();

    let (status, body) = send(app, get("/statistics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["sum"], 0.0);
}

#[tokio::test]
async fn post_then_statistics_roundtrip() {
    let app = test_app();
    let now = now_millis();

    let (status, _) = send(app.clone(), post_transaction(10.0, now - 10_000)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(app.clone(), post_transaction(4.0, now - 15_000)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, get("/statistics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["sum"], 14.0);
    assert_eq!(body["avg"], 7.0);
    assert_eq!(body["max"], 10.0);
    assert_eq!(body["min"], 4.0);
}

#[tokio::test]
async fn stale_transaction_excluded_from_statistics() {
    let app = test_app();
    let now = now_millis();

    send(app.clone(), post_transaction(99.0, now - 600_000)).await;

    let (_, body) = send(app, get("/statistics")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    send(app.clone(), post_transaction(1.0, now_millis())).await;

    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["transactionsReceived"], 1);
}
