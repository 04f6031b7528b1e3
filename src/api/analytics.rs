//! Analytics API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use super::handlers::{ApiResponse, AppState};
use crate::analytics::{
    build_analytics_report, fetch_realtime_users, resolve_filters, AnalyticsQuery,
    AnalyticsReport, RealtimeSummary,
};

/// Dashboard report for the requested range and locale.
///
/// The query string is taken as raw pairs so a repeated parameter resolves
/// to its first value instead of rejecting the request.
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<AnalyticsReport>>, ApiError> {
    let filters = resolve_filters(&AnalyticsQuery::from_pairs(params));

    match build_analytics_report(state.reports.as_ref(), &filters).await {
        Ok(report) => Ok(ApiResponse::success(report)),
        Err(e) => {
            tracing::error!(
                preset = ?filters.preset,
                locale = filters.locale.as_str(),
                "Failed to fetch GA4 report: {}",
                e
            );
            Err(ApiError::Analytics {
                source: e,
                expose_details: state.environment.exposes_error_details(),
            })
        }
    }
}

/// Active users over the last 30 minutes
pub async fn get_realtime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RealtimeSummary>>, ApiError> {
    match fetch_realtime_users(state.reports.as_ref()).await {
        Ok(summary) => Ok(ApiResponse::success(summary)),
        Err(e) => {
            tracing::error!("Failed to fetch realtime GA4 report: {}", e);
            Err(ApiError::Realtime {
                source: e,
                expose_details: state.environment.exposes_error_details(),
            })
        }
    }
}
