//! Playlist access control: ownership first, delegation second

use chorus_core::{
    error::{ChorusError, Result},
    types::{Playlist, PlaylistId, UserId},
    CollaboratorLookup,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Outward message for every denial, whatever the internal reason
const ACCESS_DENIED: &str = "You don't have access for this resource";

/// How a successful access check was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant {
    Owner,
    Collaborator,
}

/// Internal verdict; `Denied` keeps the reason for logs only
#[derive(Debug)]
enum AccessDecision {
    Owner,
    Collaborator,
    Denied(ChorusError),
}

impl AccessDecision {
    /// Collapse into the single external failure kind
    fn into_result(self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<AccessGrant> {
        match self {
            AccessDecision::Owner => Ok(AccessGrant::Owner),
            AccessDecision::Collaborator => Ok(AccessGrant::Collaborator),
            AccessDecision::Denied(reason) => {
                tracing::debug!(
                    playlist_id = %playlist_id,
                    user_id = %user_id,
                    reason = %reason,
                    "playlist access denied"
                );
                Err(ChorusError::unauthorized(ACCESS_DENIED))
            }
        }
    }
}

/// Decides whether an identity may read or mutate a playlist
#[derive(Clone)]
pub struct AccessController {
    pool: SqlitePool,
    collaborators: Arc<dyn CollaboratorLookup>,
}

impl AccessController {
    pub fn new(pool: SqlitePool, collaborators: Arc<dyn CollaboratorLookup>) -> Self {
        Self {
            pool,
            collaborators,
        }
    }

    /// Succeeds only for the playlist owner
    ///
    /// `NotFound` if the playlist does not exist, `Unauthorized` otherwise.
    pub async fn verify_owner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        let playlist = chorus_storage::playlists::require(&self.pool, playlist_id).await?;

        if !playlist.is_owned_by(user_id) {
            return Err(ChorusError::unauthorized(ACCESS_DENIED));
        }

        Ok(())
    }

    /// Succeeds for the owner or a collaborator
    ///
    /// The owner is accepted without consulting the registry. For anyone else
    /// every registry failure, lookup errors included, becomes `Unauthorized`.
    pub async fn verify_access(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<AccessGrant> {
        let playlist = chorus_storage::playlists::require(&self.pool, playlist_id).await?;

        self.decide(&playlist, user_id)
            .await
            .into_result(playlist_id, user_id)
    }

    async fn decide(&self, playlist: &Playlist, user_id: &UserId) -> AccessDecision {
        if playlist.is_owned_by(user_id) {
            return AccessDecision::Owner;
        }

        match self
            .collaborators
            .verify_collaborator(&playlist.id, user_id)
            .await
        {
            Ok(()) => AccessDecision::Collaborator,
            Err(reason) => AccessDecision::Denied(reason),
        }
    }
}
