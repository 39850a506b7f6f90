//! In-memory cache for upstream API responses
//!
//! Parsed payloads are stored by resource path (e.g. `people/1`) for the
//! lifetime of the process. There is no expiry and no eviction.

mod store;

pub use store::ResourceCache;
