//! Time-boxed cache of remote records, keyed by pincode.
//!
//! Expiry is lazy: entries are checked (and dropped) on read. There is no
//! background eviction. The cache is constructor-injected into the resolver
//! so tests own its lifecycle and `clear()` backs the admin reset action.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::record::RemoteRecord;

/// Default time-to-live for cached remote records.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    record: RemoteRecord,
    inserted_at: Instant,
}

/// Process-wide cache of [`RemoteRecord`]s with a fixed TTL.
pub struct ResolverCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResolverCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached record for `code` if present and not expired.
    /// Expired entries are removed on the way out.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<RemoteRecord> {
        self.get_at(code, Instant::now())
    }

    pub fn insert(&self, code: &str, record: RemoteRecord) {
        self.insert_at(code, record, Instant::now());
    }

    /// Drops every entry. Exposed for tests and the admin reset action.
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, code: &str, now: Instant) -> Option<RemoteRecord> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(code) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.record.clone())
            }
            Some(_) => {
                entries.remove(code);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, code: &str, record: RemoteRecord, now: Instant) {
        self.entries.lock().expect("cache lock poisoned").insert(
            code.to_string(),
            CacheEntry {
                record,
                inserted_at: now,
            },
        );
    }
}
