//! HTTP client performing the network side of a cache miss

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{FetchConfig, FetchError, FetchOutcome};
use crate::cache::ResourceCache;
use crate::stats::StatsTracker;

/// Client for fetching resources from the upstream API
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl FetchClient {
    /// Builds a client from the fetch configuration
    ///
    /// Certificate verification stays on unless `accept_invalid_certs` is set,
    /// in which case a warning is logged.
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        if config.accept_invalid_certs {
            warn!(
                base_url = %config.base_url,
                "TLS certificate verification is DISABLED; responses can be intercepted"
            );
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Full request URL for a resource path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetches and parses `path`, recording the outcome
    ///
    /// On success the payload is written to `cache` and its serialized size is
    /// added to the response byte total. Every failure increments the error
    /// count exactly once. The timeout covers the whole exchange; when it fires
    /// the in-flight request is dropped, which aborts it.
    pub async fn fetch(
        &self,
        path: &str,
        cache: &ResourceCache,
        stats: &StatsTracker,
    ) -> FetchOutcome {
        let url = self.url_for(path);
        debug!(%url, "fetching");

        let timeout = Duration::from_millis(self.timeout_ms);
        let outcome = match tokio::time::timeout(timeout, self.request(&url, path)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::Timeout {
                path: path.to_string(),
                timeout_ms: self.timeout_ms,
            }),
        };

        match outcome {
            Ok(payload) => {
                let size = serde_json::to_string(&payload).map_or(0, |s| s.len() as u64);
                cache.put(path, payload.clone());
                stats.add_response_bytes(size);
                Ok(payload)
            }
            Err(err) => {
                stats.record_error();
                debug!(path, kind = ?err.kind(), error = %err, "fetch failed");
                Err(err)
            }
        }
    }

    async fn request(&self, url: &str, path: &str) -> FetchOutcome {
        let network = |source: reqwest::Error| FetchError::Network {
            path: path.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            body.extend_from_slice(&chunk.map_err(network)?);
        }

        serde_json::from_slice::<Value>(&body).map_err(|source| FetchError::Parse {
            path: path.to_string(),
            source,
        })
    }
}
