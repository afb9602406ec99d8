//! Blocking HTTP client for the raw data endpoint.

use super::{FetchError, FetchResult};
use crate::defaults;
use log::{error, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Endpoint and request settings for the raw data download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub url: String,
    pub timeout: Duration,
}

impl FetchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(defaults::FETCH_TIMEOUT_SECS),
        }
    }
}

/// Downloads the raw node graph. The endpoint is unauthenticated.
pub struct RawDataClient {
    client: Client,
    config: FetchConfig,
}

impl RawDataClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    /// - `InvalidConfig` when the URL is blank or not http(s), or the
    ///   underlying client cannot be built.
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(FetchError::InvalidConfig("url cannot be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::InvalidConfig(format!(
                "url must start with http:// or https://, got `{url}`"
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| FetchError::InvalidConfig(err.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        self.config.url.trim()
    }

    /// Fetches and decodes the document without interpreting its shape.
    ///
    /// # Side effects
    /// - Emits `raw_fetch` events with duration and status.
    pub fn fetch(&self) -> FetchResult<Value> {
        let url = self.url().to_string();
        let started_at = Instant::now();
        info!("event=raw_fetch module=fetch status=start url={url}");

        let result = self.fetch_inner(&url);
        match &result {
            Ok(_) => info!(
                "event=raw_fetch module=fetch status=ok url={} duration_ms={}",
                url,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=raw_fetch module=fetch status=error url={} duration_ms={} error={}",
                url,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn fetch_inner(&self, url: &str) -> FetchResult<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
