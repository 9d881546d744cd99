//! Album likes

use crate::services::PlaylistCacheCoordinator;
use chorus_cache::Cached;
use chorus_core::{
    error::Result,
    types::{AlbumId, LikeState, UserId},
};
use chorus_storage::albums;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AlbumLikeService {
    pool: SqlitePool,
    cache: Arc<PlaylistCacheCoordinator>,
}

impl AlbumLikeService {
    pub fn new(pool: SqlitePool, cache: Arc<PlaylistCacheCoordinator>) -> Self {
        Self { pool, cache }
    }

    /// Flip the like of `user_id` on `album_id`
    ///
    /// Returns the state after the flip. `NotFound` if the album is missing.
    pub async fn toggle_like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<LikeState> {
        albums::require(&self.pool, album_id).await?;

        let state = albums::toggle(&self.pool, user_id, album_id).await?;
        self.cache.invalidate_album_likes(album_id).await;

        tracing::debug!(album_id = %album_id, user_id = %user_id, state = ?state, "Album like toggled");
        Ok(state)
    }

    /// Like an album; `Conflict` if already liked
    pub async fn like_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        albums::require(&self.pool, album_id).await?;

        albums::like(&self.pool, user_id, album_id).await?;
        self.cache.invalidate_album_likes(album_id).await;
        Ok(())
    }

    /// Remove a like; `NotFound` if there was none
    pub async fn unlike_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        albums::unlike(&self.pool, user_id, album_id).await?;
        self.cache.invalidate_album_likes(album_id).await;
        Ok(())
    }

    pub async fn get_album_likes(&self, album_id: &AlbumId) -> Result<Cached<i64>> {
        self.cache.get_album_likes(album_id).await
    }
}
