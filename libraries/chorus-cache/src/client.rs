//! Cache client seam

use crate::error::CacheError;
use async_trait::async_trait;
use std::time::Duration;

/// Outcome of a cache read
///
/// `Miss` is the clean "absent or expired" answer; `Fault` means the cache
/// could not answer at all. Callers fall back to the store on both.
#[derive(Debug)]
pub enum CacheLookup {
    /// Value present and fresh
    Hit(String),
    /// Key absent or expired
    Miss,
    /// Cache unreachable or failing
    Fault(CacheError),
}

/// Narrow key-value client: `get`, `set` with TTL, `delete`
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Read a key
    async fn get(&self, key: &str) -> CacheLookup;

    /// Write a key with a time-to-live
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key; removing an absent key succeeds
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Release backend connections
    async fn close(&self) {}

    /// Backend name, for logs and health output
    fn backend(&self) -> &'static str;
}

/// A value tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    pub value: T,
    pub from_cache: bool,
}

impl<T> Cached<T> {
    /// Served from the cache
    pub fn hit(value: T) -> Self {
        Self {
            value,
            from_cache: true,
        }
    }

    /// Computed from the source of truth
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            from_cache: false,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cached<U> {
        Cached {
            value: f(self.value),
            from_cache: self.from_cache,
        }
    }
}
