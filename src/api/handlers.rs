use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Environment;
use crate::ga4::ReportService;

pub struct AppState {
    pub reports: Arc<dyn ReportService>,
    pub environment: Environment,
}

/// Success envelope: `{ "ok": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self { ok: true, data })
    }
}

/// Failure envelope. Never carries a `data` field.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    ApiResponse::success(HealthStatus {
        status: "OK".to_string(),
    })
}
