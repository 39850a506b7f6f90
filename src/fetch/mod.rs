//! Fetch layer for the Star Wars API
//!
//! [`ResourceFetcher`] is the single entry point used by the rest of the
//! application. It answers from the [`ResourceCache`] when it can and otherwise
//! delegates to [`FetchClient`], which performs the network call, enforces the
//! request timeout and classifies failures.

mod client;

pub use client::FetchClient;

use serde_json::Value;
use thiserror::Error;

use crate::cache::ResourceCache;
use crate::stats::{StatsSnapshot, StatsTracker};

/// Base URL of the upstream API
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Request timeout used unless overridden on the command line
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Settings for the fetch layer, fixed once the server starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Base URL that resource paths are appended to
    pub base_url: String,
    /// Time allowed for a whole request, headers and body included
    pub timeout_ms: u64,
    /// Whether debug logging was requested
    pub debug_enabled: bool,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            debug_enabled: true,
            accept_invalid_certs: false,
        }
    }
}

/// The four ways a fetch can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Upstream status of 400 or above
    HttpStatusError,
    /// Connection, DNS or mid-body transport failure
    NetworkError,
    /// Body was not valid JSON
    ParseError,
    /// Request did not finish within the timeout
    TimeoutError,
}

/// Errors that can occur when fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream answered with a status of 400 or above
    #[error("HTTP {status} for {path}")]
    HttpStatus { path: String, status: u16 },

    /// Transport failure before the body completed
    #[error("Network error fetching {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON
    #[error("Failed to parse JSON from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// No complete response within the configured window
    #[error("Timed out after {timeout_ms}ms fetching {path}")]
    Timeout { path: String, timeout_ms: u64 },
}

impl FetchError {
    /// Which of the four failure kinds this error belongs to
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::HttpStatus { .. } => FetchErrorKind::HttpStatusError,
            FetchError::Network { .. } => FetchErrorKind::NetworkError,
            FetchError::Parse { .. } => FetchErrorKind::ParseError,
            FetchError::Timeout { .. } => FetchErrorKind::TimeoutError,
        }
    }

    /// Resource path the failed fetch was for
    pub fn path(&self) -> &str {
        match self {
            FetchError::HttpStatus { path, .. }
            | FetchError::Network { path, .. }
            | FetchError::Parse { path, .. }
            | FetchError::Timeout { path, .. } => path,
        }
    }
}

/// Result of fetching one resource path
pub type FetchOutcome = Result<Value, FetchError>;

/// Cache-fronted access to the upstream API
///
/// Owns the cache, the statistics and the HTTP client for the lifetime of the
/// process. Share it behind an `Arc` when several tasks need it.
#[derive(Debug)]
pub struct ResourceFetcher {
    config: FetchConfig,
    client: FetchClient,
    cache: ResourceCache,
    stats: StatsTracker,
}

impl ResourceFetcher {
    /// Creates a fetcher with an empty cache and zeroed statistics
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = FetchClient::new(&config)?;
        Ok(Self {
            config,
            client,
            cache: ResourceCache::new(),
            stats: StatsTracker::new(),
        })
    }

    /// Returns the payload for `path`, going to the network only on a cache miss
    ///
    /// A cache hit leaves every counter untouched. A miss counts as one API call
    /// whether or not the request then succeeds.
    pub async fn fetch_resource(&self, path: &str) -> FetchOutcome {
        if let Some(payload) = self.cache.get(path) {
            return Ok(payload);
        }

        self.stats.record_api_call();
        self.client.fetch(path, &self.cache, &self.stats).await
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.cache.len(), &self.config)
    }
}
