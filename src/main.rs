use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nimda::api;
use nimda::config::Config;
use nimda::ga4::{Ga4Client, ReportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration; missing GA4 credentials are fatal
    let config = Config::from_env().context("invalid configuration")?;
    info!("Loaded configuration");

    let client = Ga4Client::from_config(&config.ga4).context("failed to initialize GA4 client")?;
    let reports: Arc<dyn ReportService> = Arc::new(client);
    info!(
        "📊 Reporting on GA4 {} as {}",
        config.ga4.property(),
        config.ga4.client_email
    );

    if config.environment.exposes_error_details() {
        info!("🔧 Development mode - upstream error details are included in responses");
    }

    let router = api::create_api_router(
        reports,
        config.environment,
        &config.cors_allowed_origins,
    );

    let addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 API server listening on http://{}", addr);
    info!("   - Analytics available at http://{}/api/analytics", addr);
    info!("   - Realtime users at http://{}/api/analytics/realtime", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
