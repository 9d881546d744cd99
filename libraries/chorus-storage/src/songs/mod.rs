//! Song lookups
//!
//! Songs are read-only here; the catalog is maintained elsewhere.

use chorus_core::{
    error::{ChorusError, Result},
    types::*,
};
use sqlx::{Row, SqlitePool};

/// Get song by ID, failing with `NotFound` if absent
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Song> {
    let row = sqlx::query("SELECT id, title, performer, album_id FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ChorusError::not_found("Song", id.as_str()))?;

    Ok(Song {
        id: row.get("id"),
        title: row.get("title"),
        performer: row.get("performer"),
        album_id: row.get("album_id"),
    })
}
