use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::request::{RunRealtimeReportRequest, RunReportRequest};
use super::response::ReportResponse;
use super::trait_def::{Ga4Error, Ga4Result, ReportService};
use crate::auth::ServiceAccountAuth;
use crate::config::Ga4Config;

/// HTTP client for the GA4 Data API, authenticated as a service account.
#[derive(Clone)]
pub struct Ga4Client {
    client: Client,
    auth: ServiceAccountAuth,
    api_base_url: String,
    property: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl Ga4Client {
    pub fn from_config(config: &Ga4Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nimda/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client for GA4")?;

        let auth = ServiceAccountAuth::from_config(config, client.clone())?;

        Ok(Self {
            client,
            auth,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            property: config.property(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}:{}", self.api_base_url, self.property, method)
    }

    async fn post<B, T>(&self, method: &str, body: &B) -> Ga4Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let token = self.auth.access_token().await.map_err(Ga4Error::Token)?;
        let url = self.method_url(method);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<GoogleErrorEnvelope>(&bytes) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{code}: {}", envelope.error.message),
                    None => envelope.error.message,
                },
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            warn!("GA4 {method} failed with {status}: {message}");
            return Err(Ga4Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| Ga4Error::Decode(e.to_string()))
    }
}

#[async_trait]
impl ReportService for Ga4Client {
    async fn run_report(&self, request: &RunReportRequest) -> Ga4Result<ReportResponse> {
        self.post("runReport", request).await
    }

    async fn run_realtime_report(
        &self,
        request: &RunRealtimeReportRequest,
    ) -> Ga4Result<ReportResponse> {
        self.post("runRealtimeReport", request).await
    }
}
