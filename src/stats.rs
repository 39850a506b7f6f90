//! Per-process usage statistics
//!
//! Counts upstream API calls, failed fetches and response volume, and holds the
//! rotating item id that the processing cycle advances after every pass.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::fetch::FetchConfig;

/// Point-in-time copy of all counters together with the relevant configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of cache-missing fetches that went to the network
    pub api_call_count: u64,
    /// Number of failed fetches of any kind
    pub error_count: u64,
    /// Sum of the serialized sizes of all successfully parsed payloads
    pub total_response_bytes: u64,
    /// Item id used by the next processing cycle
    pub current_item_id: u64,
    /// Number of cached resource paths
    pub cache_size: usize,
    /// Whether debug logging is enabled
    pub debug_enabled: bool,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Process-wide counters
///
/// Counters only ever increase. Atomics let the tracker be shared between the
/// server and spawned processing cycles without a lock.
#[derive(Debug)]
pub struct StatsTracker {
    api_calls: AtomicU64,
    errors: AtomicU64,
    response_bytes: AtomicU64,
    current_item_id: AtomicU64,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    /// Creates a tracker with zeroed counters and the item id at 1
    pub fn new() -> Self {
        Self {
            api_calls: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            response_bytes: AtomicU64::new(0),
            current_item_id: AtomicU64::new(1),
        }
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_response_bytes(&self, bytes: u64) {
        self.response_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn api_call_count(&self) -> u64 {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn total_response_bytes(&self) -> u64 {
        self.response_bytes.load(Ordering::Relaxed)
    }

    pub fn current_item_id(&self) -> u64 {
        self.current_item_id.load(Ordering::Relaxed)
    }

    /// Moves the rotating item id forward by one, returning the new value
    pub fn advance_item_id(&self) -> u64 {
        self.current_item_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Captures all counters alongside the cache size and fetch configuration
    pub fn snapshot(&self, cache_size: usize, config: &FetchConfig) -> StatsSnapshot {
        StatsSnapshot {
            api_call_count: self.api_call_count(),
            error_count: self.error_count(),
            total_response_bytes: self.total_response_bytes(),
            current_item_id: self.current_item_id(),
            cache_size,
            debug_enabled: config.debug_enabled,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Maps an ever-increasing item id onto the range `1..=bound`
///
/// Id 1 maps to 1, so with a bound of 4 successive ids yield `1, 2, 3, 4, 1, ...`.
/// A bound of zero is treated as one.
pub fn rotating_id(item_id: u64, bound: u64) -> u64 {
    let bound = bound.max(1);
    (item_id.saturating_sub(1) % bound) + 1
}
