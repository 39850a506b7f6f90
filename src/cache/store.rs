//! Resource cache keyed by API resource path

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

/// Stores parsed API payloads by resource path
///
/// Payloads are kept as loosely-typed JSON values because the field set differs
/// for every resource kind. The lock is only held for the duration of a single
/// lookup or insert, never across an await point.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl ResourceCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the payload previously stored for `path`
    ///
    /// # Returns
    /// * `Some(Value)` - a copy of the cached payload
    /// * `None` - if nothing has been stored for this path yet
    pub fn get(&self, path: &str) -> Option<Value> {
        let entries = self.entries.read();
        let hit = entries.get(path).cloned();
        if hit.is_some() {
            debug!(path, "cache hit");
        }
        hit
    }

    /// Stores `payload` under `path`, replacing any previous entry
    pub fn put(&self, path: &str, payload: Value) {
        let size = {
            let mut entries = self.entries.write();
            entries.insert(path.to_string(), payload);
            entries.len()
        };
        debug!(path, cache_size = size, "cache miss stored");
    }

    /// Number of cached resource paths
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
