//! Cache-aside reads and write-triggered invalidation
//!
//! ## Keys
//!
//! | Key                     | Value                                      |
//! |-------------------------|--------------------------------------------|
//! | `playlist:{userId}`     | JSON list of `{id, name, username}`        |
//! | `album-likes:{albumId}` | like count, string-encoded integer         |
//!
//! ## Staleness window
//!
//! There is no serialization between a write and a concurrent read's
//! repopulation. A read that misses, loads from the store, and writes back
//! after a concurrent invalidation leaves the old value cached until the next
//! invalidation or TTL expiry. This is accepted; the TTL bounds it.
//!
//! Playlist deletion reads the collaborator list before the delete, outside a
//! transaction. A grant added between the two gets no invalidation, and its
//! grantee's listing is likewise stale for at most one TTL.
//!
//! A writer's own invalidation is awaited before the write returns, so the
//! next read by the same caller always misses.

use chorus_cache::{CacheClient, CacheLookup, Cached};
use chorus_core::{
    error::Result,
    types::{AlbumId, PlaylistSummary, UserId},
};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;

/// Cache key for the playlists visible to `user_id`
pub fn playlist_key(user_id: &UserId) -> String {
    format!("playlist:{user_id}")
}

/// Cache key for the like count of `album_id`
pub fn album_likes_key(album_id: &AlbumId) -> String {
    format!("album-likes:{album_id}")
}

/// Serves listings and counters from the cache, repopulating from the store
pub struct PlaylistCacheCoordinator {
    pool: SqlitePool,
    cache: Arc<dyn CacheClient>,
    ttl: Duration,
    invalidations: TaskTracker,
}

impl PlaylistCacheCoordinator {
    pub fn new(pool: SqlitePool, cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        Self {
            pool,
            cache,
            ttl,
            invalidations: TaskTracker::new(),
        }
    }

    /// Playlists `user_id` owns or collaborates on
    pub async fn get_playlists(&self, user_id: &UserId) -> Result<Cached<Vec<PlaylistSummary>>> {
        self.read_through(playlist_key(user_id), || {
            chorus_storage::playlists::list_for_user(&self.pool, user_id)
        })
        .await
    }

    /// Number of likes on `album_id`
    ///
    /// `NotFound` for an unknown album is only detected on a miss.
    pub async fn get_album_likes(&self, album_id: &AlbumId) -> Result<Cached<i64>> {
        self.read_through(album_likes_key(album_id), || async {
            chorus_storage::albums::require(&self.pool, album_id).await?;
            chorus_storage::albums::count_likes(&self.pool, album_id).await
        })
        .await
    }

    /// Drop the listing of `user_id` after a committed write
    pub async fn invalidate_playlists(&self, user_id: &UserId) {
        self.invalidate(playlist_key(user_id)).await;
    }

    /// Drop the like count of `album_id` after a committed write
    pub async fn invalidate_album_likes(&self, album_id: &AlbumId) {
        self.invalidate(album_likes_key(album_id)).await;
    }

    /// Wait until every in-flight invalidation has finished
    pub async fn settle(&self) {
        self.invalidations.close();
        self.invalidations.wait().await;
        self.invalidations.reopen();
    }

    /// Name of the cache backend in use
    pub fn backend(&self) -> &'static str {
        self.cache.backend()
    }

    /// Number of invalidations still running
    pub fn pending_invalidations(&self) -> usize {
        self.invalidations.len()
    }

    async fn read_through<T, F, Fut>(&self, key: String, load: F) -> Result<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.cache.get(&key).await {
            CacheLookup::Hit(raw) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => return Ok(Cached::hit(value)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding malformed cache entry");
                }
            },
            CacheLookup::Miss => {}
            CacheLookup::Fault(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, falling back to store");
            }
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, raw, self.ttl).await {
                    tracing::warn!(key = %key, error = %e, "Cache write-back failed");
                }
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache value not serializable");
            }
        }

        Ok(Cached::fresh(value))
    }

    /// Delete `key` on a tracked task and wait for it
    ///
    /// The caller's write has already committed; a failed delete is logged and
    /// the stale entry expires with its TTL. Running on the tracker lets
    /// shutdown wait for deletes whose caller was cancelled mid-await.
    async fn invalidate(&self, key: String) {
        let cache = Arc::clone(&self.cache);
        let task_key = key.clone();

        let handle = self
            .invalidations
            .spawn(async move { cache.delete(&task_key).await });

        match handle.await {
            Ok(Ok(())) => tracing::debug!(key = %key, "Cache entry invalidated"),
            Ok(Err(e)) => {
                tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache invalidation task aborted");
            }
        }
    }
}
