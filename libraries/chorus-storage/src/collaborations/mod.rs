//! Collaboration grants: delegated access of a non-owner to one playlist

use async_trait::async_trait;
use chorus_core::{
    error::{ChorusError, Result},
    traits::CollaboratorLookup,
    types::*,
};
use sqlx::{Row, SqlitePool};

/// Grant `user_id` access to `playlist_id`
///
/// The `UNIQUE (playlist_id, user_id)` constraint is the only guard against
/// duplicate grants; of two concurrent calls for the same pair exactly one
/// succeeds and the other fails with `Conflict`. A missing user or playlist
/// fails the foreign key and surfaces as `NotFound`.
pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let result = sqlx::query(
        "INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(Some(row)) => Ok(row.get("id")),
        Ok(None) => Err(ChorusError::invariant("Failed to add collaboration")),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(ChorusError::conflict(
            format!("{user_id} already collaborates on {playlist_id}"),
        )),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Err(
            ChorusError::not_found("User or playlist", format!("{user_id}/{playlist_id}")),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Revoke a grant; `NotFound` if it does not exist
pub async fn remove(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let row = sqlx::query(
        "DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ? RETURNING id",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if row.is_none() {
        return Err(ChorusError::not_found(
            "Collaboration",
            format!("{playlist_id}/{user_id}"),
        ));
    }

    Ok(())
}

/// `Ok(())` if a grant exists for the pair, `NotFound` otherwise
pub async fn verify_collaborator(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<()> {
    let row = sqlx::query("SELECT id FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(_) => Ok(()),
        None => Err(ChorusError::not_found(
            "Collaboration",
            format!("{playlist_id}/{user_id}"),
        )),
    }
}

/// Users holding a grant on the playlist
pub async fn collaborators_of(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<UserId>> {
    let rows = sqlx::query("SELECT user_id FROM collaborations WHERE playlist_id = ? ORDER BY id")
        .bind(playlist_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|row| row.get("user_id")).collect())
}

/// Grant registry bound to a pool
///
/// Thin handle over the free functions above, so access control can hold it
/// behind the `CollaboratorLookup` seam.
#[derive(Clone)]
pub struct CollaborationRegistry {
    pool: SqlitePool,
}

impl CollaborationRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
        add(&self.pool, playlist_id, user_id).await
    }

    pub async fn remove(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        remove(&self.pool, playlist_id, user_id).await
    }

    pub async fn collaborators_of(&self, playlist_id: &PlaylistId) -> Result<Vec<UserId>> {
        collaborators_of(&self.pool, playlist_id).await
    }
}

#[async_trait]
impl CollaboratorLookup for CollaborationRegistry {
    async fn verify_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<()> {
        verify_collaborator(&self.pool, playlist_id, user_id).await
    }
}
