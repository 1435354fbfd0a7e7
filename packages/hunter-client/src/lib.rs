//! Pure Hunter.io REST API client.
//!
//! A minimal client for the Hunter v2 API. Supports domain search and
//! account quota lookups. No batching, pacing or result shaping happens here.
//!
//! # Example
//!
//! ```rust,ignore
//! use hunter_client::HunterClient;
//!
//! let client = HunterClient::new("your-api-key");
//!
//! let data = client.domain_search("stripe.com", 10).await?;
//! for email in &data.emails {
//!     println!("{}", email.value.as_deref().unwrap_or("(no address)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{HunterError, Result};
pub use types::{AccountData, DomainSearchData, EmailSource, ProviderEmail, RequestQuota};

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretBox};
use serde::de::DeserializeOwned;
use tracing::debug;
use types::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.hunter.io/v2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hunter API key. Never shows up in `Debug` output or logs.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Only call this when building the outbound request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct HunterClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl HunterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different host (proxies, mock servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the addresses Hunter knows for `domain`, returning at most `limit`.
    pub async fn domain_search(&self, domain: &str, limit: u32) -> Result<DomainSearchData> {
        debug!(domain, limit, "Hunter domain search");
        let limit = limit.to_string();
        self.get("domain-search", &[("domain", domain), ("limit", &limit)])
            .await
    }

    /// Fetch plan and quota information for the API key.
    pub async fn account(&self) -> Result<AccountData> {
        self.get("account", &[]).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("api_key", self.api_key.expose())])
            .timeout(self.timeout)
            .send()
            .await
            // The request URL carries the key; keep it out of the message.
            .map_err(|e| HunterError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HunterError::from_response(status.as_u16(), &body));
        }

        let api_resp: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| HunterError::Parse(e.without_url().to_string()))?;
        Ok(api_resp.data)
    }
}

impl fmt::Debug for HunterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunterClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
