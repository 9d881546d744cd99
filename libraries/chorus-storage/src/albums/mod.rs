//! Album existence and like grants
//!
//! A like is the existence of a `(user, album)` row. The count is never
//! stored; `count_likes` derives it on demand.

use chorus_core::{
    error::{ChorusError, Result},
    types::*,
};
use sqlx::{Row, SqlitePool};

/// Whether the album exists
pub async fn exists(pool: &SqlitePool, album_id: &AlbumId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS present FROM albums WHERE id = ?")
        .bind(album_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// `NotFound` unless the album exists
pub async fn require(pool: &SqlitePool, album_id: &AlbumId) -> Result<()> {
    if exists(pool, album_id).await? {
        Ok(())
    } else {
        Err(ChorusError::not_found("Album", album_id.as_str()))
    }
}

/// Current like state of `user_id` for the album
pub async fn like_state(
    pool: &SqlitePool,
    user_id: &UserId,
    album_id: &AlbumId,
) -> Result<LikeState> {
    let row = sqlx::query("SELECT 1 AS present FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id)
        .bind(album_id)
        .fetch_optional(pool)
        .await?;

    Ok(if row.is_some() {
        LikeState::Liked
    } else {
        LikeState::NotLiked
    })
}

/// Add a like; `Conflict` if the user already likes the album
pub async fn like(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    let result = sqlx::query("INSERT INTO user_album_likes (user_id, album_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(ChorusError::conflict(
            format!("{user_id} already likes {album_id}"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Remove a like; `NotFound` if there was none
pub async fn unlike(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ChorusError::not_found("Album like", format!("{user_id}/{album_id}")));
    }

    Ok(())
}

/// Flip the like state and return the new state
///
/// Runs in one transaction: delete the grant if present, insert it otherwise.
pub async fn toggle(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<LikeState> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id)
        .bind(album_id)
        .execute(&mut *tx)
        .await?;

    let state = if removed.rows_affected() > 0 {
        LikeState::NotLiked
    } else {
        sqlx::query("INSERT INTO user_album_likes (user_id, album_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(album_id)
            .execute(&mut *tx)
            .await?;
        LikeState::Liked
    };

    tx.commit().await?;

    Ok(state)
}

/// Number of users liking the album
pub async fn count_likes(pool: &SqlitePool, album_id: &AlbumId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS likes FROM user_album_likes WHERE album_id = ?")
        .bind(album_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get("likes"))
}
