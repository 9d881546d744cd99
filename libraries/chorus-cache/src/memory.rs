//! In-process cache backend

use crate::client::{CacheClient, CacheLookup};
use crate::error::CacheError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cached entry with TTL support.
#[derive(Clone, Debug)]
struct CachedEntry {
    data: String,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn new(data: String, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Single-instance cache backed by `DashMap`
///
/// Expired entries are dropped lazily on read, or eagerly by
/// [`MemoryCache::purge_expired`].
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<DashMap<String, CachedEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let Some(entry) = self.entries.get(key) else {
            tracing::debug!(key = %key, "cache miss");
            return CacheLookup::Miss;
        };

        if entry.is_expired() {
            drop(entry);
            self.entries.remove(key);
            tracing::debug!(key = %key, "cache miss (expired)");
            return CacheLookup::Miss;
        }

        tracing::debug!(key = %key, "cache hit");
        CacheLookup::Hit(entry.data.clone())
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .insert(key.to_string(), CachedEntry::new(value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        tracing::debug!(key = %key, "cache invalidated");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
