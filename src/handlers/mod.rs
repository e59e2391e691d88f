// src/handlers/mod.rs

use crate::error::Result;
use crate::state::AppState;
use crate::storage::{CheckRecord, Site};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CreateSite {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// Response body for `GET /status/{id}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub url: String,
    pub online: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
}

/// One entry of `GET /history/{id}`. The site id is implied by the path.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub online: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
    pub checked_at: DateTime<Utc>,
}

impl From<CheckRecord> for HistoryEntry {
    fn from(record: CheckRecord) -> Self {
        Self {
            online: record.online,
            status_code: record.status_code,
            response_time_ms: record.response_time_ms,
            checked_at: record.checked_at,
        }
    }
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /sites` - all registered sites in creation order.
pub async fn list_sites(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Site>>> {
    let sites = state.sites.list().await?;
    Ok(Json(sites))
}

/// `POST /sites` - register a URL for monitoring.
pub async fn add_site(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSite>,
) -> Result<impl IntoResponse> {
    let site = state.sites.register(payload.url.trim()).await?;
    info!(site.id = site.id, site.url = %site.url, "Registered new site");
    Ok((StatusCode::CREATED, Json(site)))
}

/// `GET /status/{id}` - run a live probe and return the immediate result.
pub async fn check_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<StatusResponse>> {
    let (site, record) = state.status.check(id).await?;
    Ok(Json(StatusResponse {
        url: site.url,
        online: record.online,
        status_code: record.status_code,
        response_time_ms: round2(record.response_time_ms),
    }))
}

/// `GET /history/{id}` - past check results, most recent first.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let records = state.history.list(id, params.limit).await?;
    Ok(Json(records.into_iter().map(HistoryEntry::from).collect()))
}

// Stored values stay raw; only the status response is rounded for display.
fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
