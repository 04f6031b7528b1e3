use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::handlers::ErrorResponse;
use crate::ga4::Ga4Error;

/// Failures surfaced to the dashboard. Upstream errors are logged in full
/// but only described in the body when running in development.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch analytics data")]
    Analytics {
        #[source]
        source: Ga4Error,
        expose_details: bool,
    },
    #[error("Failed to fetch realtime analytics data")]
    Realtime {
        #[source]
        source: Ga4Error,
        expose_details: bool,
    },
}

impl ApiError {
    fn details(&self) -> Option<String> {
        match self {
            ApiError::Analytics {
                source,
                expose_details,
            }
            | ApiError::Realtime {
                source,
                expose_details,
            } => expose_details.then(|| source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let body = ErrorResponse {
            ok: false,
            error: message.clone(),
            message,
            details: self.details(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
