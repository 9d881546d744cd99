//! Chorus Cache
//!
//! Key-value cache used as a read-through accelerator in front of the
//! relational store. Never the source of truth: every value here can be
//! recomputed, and every failure degrades to a miss.
//!
//! ## Backends
//!
//! - **Memory**: single-instance, `DashMap` with per-entry TTL
//! - **Redis**: shared across instances through a `deadpool-redis` pool
//!
//! [`create_cache`] picks one from configuration and falls back to memory if
//! Redis cannot be reached at startup.

mod client;
mod config;
mod error;
mod memory;
mod redis_cache;

pub use client::{CacheClient, CacheLookup, Cached};
pub use config::RedisConfig;
pub use error::CacheError;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use std::sync::Arc;
use std::time::Duration;

/// Create a cache client based on configuration.
///
/// ## Graceful Degradation
///
/// If Redis is disabled, or the pool cannot be created or reached, the
/// process runs with an in-memory cache instead of refusing to start.
pub async fn create_cache(config: &RedisConfig) -> Arc<dyn CacheClient> {
    if !config.enabled {
        tracing::info!("Redis disabled, using in-memory cache");
        return Arc::new(MemoryCache::new());
    }

    tracing::info!(url = %config.url, "Connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    let timeout = Duration::from_millis(config.timeout_ms);
    let pool_config = redis_config.pool.get_or_insert_with(Default::default);
    pool_config.max_size = config.pool_size;
    pool_config.timeouts.wait = Some(timeout);
    pool_config.timeouts.create = Some(timeout);
    pool_config.timeouts.recycle = Some(timeout);

    let pool = match redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1)) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create Redis pool, falling back to in-memory cache");
            return Arc::new(MemoryCache::new());
        }
    };

    match pool.get().await {
        Ok(_) => {
            tracing::info!("Connected to Redis");
            Arc::new(RedisCache::new(pool))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to Redis, falling back to in-memory cache");
            Arc::new(MemoryCache::new())
        }
    }
}
