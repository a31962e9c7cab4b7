//! Pluggable response cache.
//!
//! The binder consults the configured [`ResponseCache`] before sending a GET
//! and stores the response after it has been parsed successfully. Only GET
//! responses are cached. Keys come from
//! [`PreparedRequest::cache_key`](crate::clients::PreparedRequest::cache_key):
//! method, resolved URL and encoded parameters, prefixed by a fingerprint of
//! the access token so one cache can serve several credentials.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ringplus::rest::MemoryCache;
//! use ringplus::RingPlusConfig;
//!
//! let config = RingPlusConfig::builder()
//!     .cache(Arc::new(MemoryCache::new(Duration::from_secs(30))))
//!     .build()
//!     .unwrap();
//! assert!(config.cache().is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::clients::HttpResponse;

/// A store for successful GET responses.
///
/// Implementations own their synchronization; the binder shares one instance
/// across every call made through a client.
pub trait ResponseCache: Send + Sync + fmt::Debug {
    /// Returns the cached response for `key`, if present and fresh.
    fn get(&self, key: &str) -> Option<HttpResponse>;

    /// Stores `response` under `key`.
    fn set(&self, key: &str, response: HttpResponse);
}

/// An in-memory cache whose entries expire after a fixed time-to-live.
pub struct MemoryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, HttpResponse)>>,
}

impl MemoryCache {
    /// Creates an empty cache with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the number of stored entries, including expired ones not yet
    /// evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<HttpResponse> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some((stored, response)) if stored.elapsed() < self.ttl => Some(response.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, response: HttpResponse) {
        if let Ok(mut entries) = self.entries.lock() {
            let ttl = self.ttl;
            entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
            entries.insert(key.to_string(), (Instant::now(), response));
        }
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

// Verify cache types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryCache>();
};
