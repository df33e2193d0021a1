//! Axum app: state, router and handlers.
//!
//! The analysis service (and the provider client inside it) is built once at startup and
//! shared read-only by every request through [`AppState`].

use std::sync::Arc;

use advisor::{AnalysisRequest, AnalysisService};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::response::{error_response, ApiError};

/// Name reported by the health check.
pub const SERVICE_NAME: &str = "process-advisor";

/// Shared state injected into the router.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Builds the router: `GET /`, `POST /api/analyze`, permissive CORS and request tracing.
pub fn router(service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(AppState { service })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Handles `POST /api/analyze`. A body that is not a JSON object of the expected shape is a 400
/// with the same `{"error": ...}` body as every other failure.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable analyze request body");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON request body: {}", rejection.body_text()),
            );
        }
    };
    match state.service.analyze(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
