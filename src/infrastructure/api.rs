//! API Server (Cold Path)
//!
//! HTTP surface over the window store: transaction ingestion, statistics
//! reads, and a health probe. Request-level validation (malformed payloads)
//! is handled here by the JSON extractor; the store itself never fails.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::{Aggregate, Event};
use crate::infrastructure::config::ApiConfig;
use crate::infrastructure::metrics::MetricsCollector;
use crate::store::WindowStore;
use crate::{Result, StatsError};

/// Incoming transaction payload
#[derive(Debug, Deserialize)]
pub struct TransactionDto {
    pub amount: f64,
    pub timestamp: i64,
}

/// Statistics response, 1:1 with the aggregate fields
///
/// `avg` is the wire name for the mean. Non-finite extrema of the empty
/// aggregate serialize as null.
#[derive(Debug, Serialize)]
pub struct StatisticDto {
    pub sum: f64,
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    pub count: u64,
}

impl From<Aggregate> for StatisticDto {
    fn from(aggregate: Aggregate) -> Self {
        Self {
            sum: aggregate.sum,
            avg: aggregate.mean,
            max: aggregate.max,
            min: aggregate.min,
            count: aggregate.count,
        }
    }
}

/// Health probe response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub transactions_received: u64,
    pub statistics_served: u64,
    pub transaction_rate: f64,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WindowStore>,
    pub metrics: Arc<MetricsCollector>,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/transactions", post(post_transaction))
        .route("/statistics", get(get_statistics))
        .route("/health", get(get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(
    store: Arc<WindowStore>,
    metrics: Arc<MetricsCollector>,
    config: &ApiConfig,
) -> Result<()> {
    let app = router(AppState { store, metrics });

    let ip = config
        .bind
        .parse()
        .map_err(|_| StatsError::Config(format!("invalid bind address: {}", config.bind)))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(target: "api", "API Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(StatsError::Io)?;

    axum::serve(listener, app).await.map_err(StatsError::Io)?;

    Ok(())
}

/// Handler for POST /transactions
///
/// Always 201: out-of-window and future-dated events are silently dropped
/// by the store, not surfaced as request failures.
async fn post_transaction(
    State(state): State<AppState>,
    Json(body): Json<TransactionDto>,
) -> StatusCode {
    state.metrics.record_transaction();
    state.store.record(Event::new(body.amount, body.timestamp));

    StatusCode::CREATED
}

/// Handler for GET /statistics
async fn get_statistics(State(state): State<AppState>) -> Json<StatisticDto> {
    state.metrics.record_statistics_read();
    let aggregate = state.store.snapshot();

    Json(StatisticDto::from(aggregate))
}

/// Handler for GET /health
async fn get_health(State(state): State<AppState>) -> Json<HealthDto> {
    let snapshot = state.metrics.snapshot();

    Json(HealthDto {
        status: "ok",
        uptime_seconds: snapshot.uptime_seconds,
        transactions_received: snapshot.transactions_received,
        statistics_served: snapshot.statistics_served,
        transaction_rate: snapshot.transaction_rate,
    })
}
