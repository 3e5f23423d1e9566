//! Health check handler

use axum::Json;
use utoipa::ToSchema;

use super::super::types::ApiResponse;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Gateway build version
    #[schema(example = "0.1.0+3f2a9c1")]
    pub version: String,
}

/// Liveness check
///
/// Answers from the gateway itself; backends are not contacted.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway alive", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        timestamp_ms: chrono::Utc::now().timestamp_millis().max(0) as u64,
        version: crate::VERSION.to_string(),
    }))
}
