//! Playlist operations: access checks, durable writes, then invalidation

use crate::services::{AccessController, PlaylistCacheCoordinator};
use chorus_cache::Cached;
use chorus_core::{
    error::Result,
    types::{
        ActivityAction, CollaborationId, PlaylistActivity, PlaylistDetail, PlaylistId,
        PlaylistSummary, SongId, UserId,
    },
};
use chorus_storage::{activities, playlists, songs, CollaborationRegistry};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Orchestrates playlist reads and writes
///
/// Every mutation commits to the store before the affected cache keys are
/// invalidated.
#[derive(Clone)]
pub struct PlaylistService {
    pool: SqlitePool,
    access: Arc<AccessController>,
    registry: CollaborationRegistry,
    cache: Arc<PlaylistCacheCoordinator>,
}

impl PlaylistService {
    pub fn new(
        pool: SqlitePool,
        access: Arc<AccessController>,
        registry: CollaborationRegistry,
        cache: Arc<PlaylistCacheCoordinator>,
    ) -> Self {
        Self {
            pool,
            access,
            registry,
            cache,
        }
    }

    pub fn access(&self) -> &AccessController {
        &self.access
    }

    pub async fn add_playlist(&self, name: &str, owner_id: &UserId) -> Result<PlaylistId> {
        let playlist_id = playlists::create(&self.pool, name, owner_id).await?;
        self.cache.invalidate_playlists(owner_id).await;

        tracing::info!(playlist_id = %playlist_id, owner_id = %owner_id, "Playlist created");
        Ok(playlist_id)
    }

    pub async fn get_playlists(&self, user_id: &UserId) -> Result<Cached<Vec<PlaylistSummary>>> {
        self.cache.get_playlists(user_id).await
    }

    /// Delete an owned playlist with its songs, grants and activity
    ///
    /// Listings of the owner and of every collaborator are invalidated.
    pub async fn delete_playlist(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        self.access.verify_owner(playlist_id, user_id).await?;

        let collaborators = self.registry.collaborators_of(playlist_id).await?;
        playlists::delete(&self.pool, playlist_id).await?;

        self.cache.invalidate_playlists(user_id).await;
        for collaborator in &collaborators {
            self.cache.invalidate_playlists(collaborator).await;
        }

        tracing::info!(
            playlist_id = %playlist_id,
            collaborators = collaborators.len(),
            "Playlist deleted"
        );
        Ok(())
    }

    pub async fn add_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        songs::get_by_id(&self.pool, song_id).await?;
        self.access.verify_access(playlist_id, user_id).await?;

        playlists::add_song(&self.pool, playlist_id, song_id).await?;
        activities::record(&self.pool, playlist_id, song_id, user_id, ActivityAction::Add).await?;

        tracing::debug!(playlist_id = %playlist_id, song_id = %song_id, "Song added to playlist");
        Ok(())
    }

    pub async fn get_songs(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<PlaylistDetail> {
        self.access.verify_access(playlist_id, user_id).await?;
        playlists::get_detail(&self.pool, playlist_id).await
    }

    pub async fn delete_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        self.access.verify_access(playlist_id, user_id).await?;

        playlists::remove_song(&self.pool, playlist_id, song_id).await?;
        activities::record(
            &self.pool,
            playlist_id,
            song_id,
            user_id,
            ActivityAction::Delete,
        )
        .await?;

        tracing::debug!(playlist_id = %playlist_id, song_id = %song_id, "Song removed from playlist");
        Ok(())
    }

    pub async fn get_activities(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<Vec<PlaylistActivity>> {
        self.access.verify_access(playlist_id, user_id).await?;
        activities::list_by_playlist(&self.pool, playlist_id).await
    }

    /// Grant `collaborator_id` access; only the owner may do this
    pub async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        owner_id: &UserId,
        collaborator_id: &UserId,
    ) -> Result<CollaborationId> {
        self.access.verify_owner(playlist_id, owner_id).await?;

        let collaboration_id = self.registry.add(playlist_id, collaborator_id).await?;
        self.cache.invalidate_playlists(collaborator_id).await;

        tracing::info!(
            playlist_id = %playlist_id,
            user_id = %collaborator_id,
            "Collaborator added"
        );
        Ok(collaboration_id)
    }

    /// Revoke `collaborator_id`'s access; only the owner may do this
    pub async fn remove_collaborator(
        &self,
        playlist_id: &PlaylistId,
        owner_id: &UserId,
        collaborator_id: &UserId,
    ) -> Result<()> {
        self.access.verify_owner(playlist_id, owner_id).await?;

        self.registry.remove(playlist_id, collaborator_id).await?;
        self.cache.invalidate_playlists(collaborator_id).await;

        tracing::info!(
            playlist_id = %playlist_id,
            user_id = %collaborator_id,
            "Collaborator removed"
        );
        Ok(())
    }
}
