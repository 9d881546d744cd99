//! Redis cache backend

use crate::client::{CacheClient, CacheLookup};
use crate::error::CacheError;
use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use std::time::Duration;

/// Shared cache backed by a Redis connection pool
///
/// Redis owns expiry (`SET ... EX`), so there is no local bookkeeping.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Whether a connection can currently be obtained
    pub async fn is_available(&self) -> bool {
        self.pool.get().await.is_ok()
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get Redis connection");
                return CacheLookup::Fault(e.into());
            }
        };

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(data)) => {
                tracing::debug!(key = %key, "cache hit");
                CacheLookup::Hit(data)
            }
            Ok(None) => {
                tracing::debug!(key = %key, "cache miss");
                CacheLookup::Miss
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Redis GET error");
                CacheLookup::Fault(e.into())
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;
        // EX 0 is rejected by Redis
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        tracing::debug!(key = %key, ttl_secs, "cache set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.pool.get().await?;

        conn.del::<_, ()>(key).await?;
        tracing::debug!(key = %key, "cache invalidated");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close();
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
