//! Receipt endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::receipt::Receipt;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub receipts: usize,
}

/// GET /
pub async fn home() -> &'static str {
    "We are live"
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        receipts: state.processor.processed_count(),
    })
}

/// POST /receipts/process
///
/// A body that does not decode as a receipt is rejected before any id is
/// generated or anything is stored.
pub async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProcessResponse>)> {
    let Json(receipt) = payload.map_err(|rejection| {
        warn!("Rejected receipt: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let id = state.processor.submit(&receipt);
    Ok((StatusCode::CREATED, Json(ProcessResponse { id })))
}

/// GET /receipts/:id/points
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    match state.processor.lookup(&id) {
        Some(points) => Ok(Json(PointsResponse { points })),
        None => {
            debug!(id = %id, "Points lookup for unknown id");
            Err(ApiError::NotFound("Id not found".to_string()))
        }
    }
}
