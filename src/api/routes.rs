use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::Environment;
use crate::ga4::ReportService;

use super::analytics::{get_analytics, get_realtime};
use super::handlers::{health_check, AppState};

pub fn create_api_router(
    reports: Arc<dyn ReportService>,
    environment: Environment,
    cors_allowed_origins: &[String],
) -> Router {
    let state = Arc::new(AppState {
        reports,
        environment,
    });

    let api_routes = Router::new()
        .route("/analytics", get(get_analytics))
        .route("/analytics/realtime", get(get_realtime))
        .with_state(state);

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes);

    match cors_layer(cors_allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([axum::http::Method::GET])
            .allow_headers(Any),
    )
}
