use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Ga4Config;

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Mints and caches OAuth access tokens for a Google service account using
/// the JWT bearer grant.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    client_email: String,
    token_url: String,
    encoding_key: Arc<EncodingKey>,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_SKEW < self.expires_at
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "TokenResponse::default_expires_in")]
    expires_in: u64,
}

impl TokenResponse {
    const fn default_expires_in() -> u64 {
        3600
    }
}

impl ServiceAccountAuth {
    pub fn from_config(config: &Ga4Config, client: Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
            .context("GOOGLE_PRIVATE_KEY is not a valid RSA private key in PEM format")?;

        Ok(Self {
            client_email: config.client_email.clone(),
            token_url: config.token_url.clone(),
            encoding_key: Arc::new(encoding_key),
            client,
            cached: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns a valid access token, minting a new one when the cached token
    /// is missing or about to expire.
    pub async fn access_token(&self) -> Result<String> {
        {
            let guard = self.cached.read().await;
            if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.access_token.clone());
            }
        }

        let mut guard = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.access_token.clone());
        }

        debug!("Requesting new GA4 access token for {}", self.client_email);
        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *guard = Some(token);

        Ok(access_token)
    }

    fn signed_assertion(&self) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: ANALYTICS_READONLY_SCOPE,
            aud: &self.token_url,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("failed to sign service account assertion")
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let assertion = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("failed to request access token")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("token endpoint returned {status}: {body}"));
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("failed to parse token response")?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_token_freshness_respects_skew() {
        let fresh = CachedToken {
            access_token: "a".into(),
            expires_at: Instant::now() + Duration::from_secs(600),
        };
        let nearly_expired = CachedToken {
            access_token: "b".into(),
            expires_at: Instant::now() + Duration::from_secs(30),
        };

        assert!(fresh.is_fresh());
        assert!(!nearly_expired.is_fresh());
    }

    #[test]
    fn rejects_malformed_private_key() {
        let config = Ga4Config {
            client_email: "reporter@example.iam.gserviceaccount.com".into(),
            private_key: "not a key".into(),
            property_id: "1".into(),
            api_base_url: "http://localhost".into(),
            token_url: "http://localhost/token".into(),
        };

        assert!(ServiceAccountAuth::from_config(&config, Client::new()).is_err());
    }
}
