//! In-memory TTL cache for remote check results.
//!
//! Keyed by the exact outbound request URL, so two checks differing in actor
//! order or the `cache` hint never share an entry. Eviction is lazy: an
//! expired entry is dropped on the read that finds it, never by a background
//! sweep.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch.
pub(crate) fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    enabled: bool,
    expires_at: i64,
}

/// TTL cache of check results for one client instance.
#[derive(Debug, Default)]
pub(crate) struct CheckCache {
    entries: HashMap<String, CacheEntry>,
}

impl CheckCache {
    /// Look up a live entry. An entry is live while `expires_at >= now`;
    /// an expired entry is evicted and `None` returned.
    pub fn get(&mut self, key: &str, now: i64) -> Option<bool> {
        match self.entries.get(key) {
            Some(entry) if entry.expires_at >= now => Some(entry.enabled),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a result. A negative TTL yields an `expires_at` in the past,
    /// which the next read treats as expired.
    pub fn insert(&mut self, key: String, enabled: bool, ttl: i64, now: i64) {
        self.entries.insert(
            key,
            CacheEntry {
                enabled,
                expires_at: now + ttl,
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
