// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cache handle handed to the transport.
//!
//! The client never looks inside a cache; it just forwards the handle with every request. The
//! bundled `HyperTransport` uses it to revalidate `GET` responses: a stored response that carried
//! an `ETag` or `Last-Modified` header is sent back as `If-None-Match`/`If-Modified-Since`, and a
//! `304 Not Modified` answer is served from the stored body.

use std::collections::HashMap;
use std::sync::Mutex;

/// A stored response body with the validators it was sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    /// The `ETag` header of the stored response.
    pub etag: Option<String>,
    /// The `Last-Modified` header of the stored response.
    pub last_modified: Option<String>,
    /// The body of the stored response.
    pub body: String,
}

/// Storage for responses, keyed by request URL.
pub trait Cache: Send + Sync {
    /// Looks up the stored response for the given URL.
    fn get(&self, url: &str) -> Option<CachedResponse>;

    /// Stores a response for the given URL, replacing what was there.
    fn set(&self, url: &str, entry: CachedResponse);
}

/// A `Cache` that keeps everything in memory for the lifetime of the handle.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedResponse>>,
}

impl MemoryCache {
    /// Creates an empty `MemoryCache`.
    pub fn new() -> MemoryCache {
        MemoryCache::default()
    }

    /// Returns the number of stored responses.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str) -> Option<CachedResponse> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    fn set(&self, url: &str, entry: CachedResponse) {
        // a poisoned lock just means nothing gets cached
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url.to_string(), entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());
        assert!(cache.get("https://api.twitter.com/1/help/test.json").is_none());

        let entry = CachedResponse {
            etag: Some("\"abc\"".to_string()),
            last_modified: None,
            body: "\"ok\"".to_string(),
        };
        cache.set("https://api.twitter.com/1/help/test.json", entry.clone());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://api.twitter.com/1/help/test.json"), Some(entry));
    }
}
