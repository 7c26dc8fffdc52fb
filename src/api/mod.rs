//! HTTP surface of the receipt processor

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{PointsResponse, ProcessResponse};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::processor::ReceiptProcessor;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<ReceiptProcessor>,
}

impl AppState {
    pub fn new(processor: Arc<ReceiptProcessor>) -> Self {
        Self { processor }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/receipts/process", post(handlers::process_receipt))
        .route("/receipts/:id/points", get(handlers::get_points))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
