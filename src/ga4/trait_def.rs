use async_trait::async_trait;
use thiserror::Error;

use super::request::{RunRealtimeReportRequest, RunReportRequest};
use super::response::ReportResponse;

#[derive(Debug, Error)]
pub enum Ga4Error {
    #[error("failed to obtain access token: {0:#}")]
    Token(anyhow::Error),
    #[error("request to GA4 failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GA4 returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode GA4 response: {0}")]
    Decode(String),
}

pub type Ga4Result<T> = Result<T, Ga4Error>;

/// The external reporting service: accepts report specifications and
/// returns raw rows of dimension and metric values.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Run a standard report over the configured property.
    async fn run_report(&self, request: &RunReportRequest) -> Ga4Result<ReportResponse>;

    /// Run a realtime report (last 30 minutes) over the configured property.
    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Ga4Result<ReportResponse>;
}
