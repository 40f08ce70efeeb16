//! Expiring cache for resolved presigned links
//!
//! Entries are keyed by the fully-qualified first-hop request URL and hold
//! the payload fetched from the link target. Expiry is checked on read; there
//! is no background eviction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::payload::Payload;

/// Source of wall-clock time for expiry checks.
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cached link payload with its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Payload fetched from the link target
    pub payload: Payload,
    /// Instant at which the entry stops being served
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create new cache entry
    pub fn new(payload: Payload, expires_at: DateTime<Utc>) -> Self {
        Self { payload, expires_at }
    }

    /// Valid only while expiry is strictly in the future.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-memory map of resolved links.
#[derive(Debug, Clone, Default)]
pub struct LinkCache {
    entries: HashMap<String, CacheEntry>,
}

impl LinkCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload for `key`, if an entry exists and has not expired.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&Payload> {
        match self.entries.get(key) {
            Some(entry) if entry.is_valid(now) => Some(&entry.payload),
            Some(entry) => {
                trace!(key, expired_at = %entry.expires_at, "Cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite the entry for `key`.
    pub fn insert(&mut self, key: impl Into<String>, payload: Payload, expires_at: DateTime<Utc>) {
        self.entries.insert(key.into(), CacheEntry::new(payload, expires_at));
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_valid(now));
        before - self.entries.len()
    }

    /// Number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
