//! Seams between access control and its collaborators

use crate::error::Result;
use crate::types::{PlaylistId, UserId};
use async_trait::async_trait;

/// Delegation check consulted when the caller is not the playlist owner.
///
/// Implementations return `Ok(())` when a collaboration grant exists for the
/// pair. Any error, whether "no grant" or a failed lookup, is treated as a
/// denial by the caller.
#[async_trait]
pub trait CollaboratorLookup: Send + Sync {
    /// Verify that `user_id` holds a collaboration grant on `playlist_id`
    async fn verify_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<()>;
}
