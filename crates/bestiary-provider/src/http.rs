//! HTTP creature catalog provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use bestiary_core::{defaults, CreatureProvider, Error, ProviderCreature, Result};

/// Default base URL of the external catalog.
pub const DEFAULT_PROVIDER_URL: &str = defaults::PROVIDER_URL;

/// HTTP implementation of [`CreatureProvider`].
///
/// Fetches `{base_url}/{id}` and decodes the provider's record shape.
/// Requests carry a client-level timeout; callers treat every fetch as slow
/// and fallible and never hold a storage transaction open across one.
pub struct HttpCreatureProvider {
    client: Client,
    base_url: String,
}

impl HttpCreatureProvider {
    /// Create a provider against the default catalog URL.
    pub fn new() -> Result<Self> {
        Self::with_config(
            DEFAULT_PROVIDER_URL.to_string(),
            defaults::PROVIDER_TIMEOUT_SECS,
        )
    }

    /// Create a provider with a custom base URL and timeout.
    pub fn with_config(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "provider",
            component = "http",
            base_url = %base_url,
            timeout_secs,
            "Initializing catalog provider"
        );

        Ok(Self { client, base_url })
    }

    /// Create from environment variables.
    ///
    /// `BESTIARY_PROVIDER_URL` overrides the base URL,
    /// `BESTIARY_PROVIDER_TIMEOUT_SECS` the request timeout.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BESTIARY_PROVIDER_URL")
            .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());
        let timeout_secs = std::env::var("BESTIARY_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::PROVIDER_TIMEOUT_SECS);
        Self::with_config(base_url, timeout_secs)
    }
}

#[async_trait]
impl CreatureProvider for HttpCreatureProvider {
    async fn fetch_by_id(&self, id: i64) -> Result<ProviderCreature> {
        let start = Instant::now();
        let url = format!("{}/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "External catalog has no record {}",
                id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Upstream(format!(
                "Provider returned status {} for record {}",
                status, id
            )));
        }

        let record: ProviderCreature = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse provider response: {}", e)))?;

        debug!(
            subsystem = "provider",
            component = "http",
            op = "fetch_by_id",
            external_id = id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched external record"
        );

        Ok(record)
    }
}
