//! Health check endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Local};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Time of the last published refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Number of entries in the last refresh
    pub entries: Option<usize>,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let last = state
        .services
        .refresh
        .with_state(|s| (s.refreshed_at, s.entries.len()))
        .await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        last_refresh: last.map(|(at, _)| at),
        entries: last.map(|(_, count)| count),
    })
}
