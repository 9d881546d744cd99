//! Playlist and playlist-song membership queries

use chorus_core::{
    error::{ChorusError, Result},
    types::*,
};
use sqlx::{Row, SqlitePool};

/// Create new playlist owned by `owner`
///
/// Fails with `Invariant` if the insert returns no row.
pub async fn create(pool: &SqlitePool, name: &str, owner: &UserId) -> Result<PlaylistId> {
    let id = PlaylistId::generate();

    let row = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?) RETURNING id")
        .bind(&id)
        .bind(name)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(ChorusError::invariant("Failed to add playlist"));
    };

    Ok(row.get("id"))
}

/// Get playlist row by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Playlist {
        id: row.get("id"),
        name: row.get("name"),
        owner_id: row.get("owner"),
    }))
}

/// Get playlist row by ID, failing with `NotFound` if absent
pub async fn require(pool: &SqlitePool, id: &PlaylistId) -> Result<Playlist> {
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ChorusError::not_found("Playlist", id.as_str()))
}

/// Playlists the user owns or collaborates on
///
/// This is the authoritative value behind the `playlist:{userId}` cache entry.
pub async fn list_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        LEFT JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ? OR c.user_id = ?
        ORDER BY p.name, p.id
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Delete playlist
///
/// Collaborations, memberships and activity rows go with it through
/// `ON DELETE CASCADE`.
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let row = sqlx::query("DELETE FROM playlists WHERE id = ? RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if row.is_none() {
        return Err(ChorusError::not_found("Playlist", id.as_str()));
    }

    Ok(())
}

/// Attach a song to a playlist
///
/// Duplicate `(playlist, song)` pairs are accepted.
pub async fn add_song(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    let id = MembershipId::generate();

    let row = sqlx::query(
        "INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .fetch_optional(pool)
    .await?;

    if row.is_none() {
        return Err(ChorusError::invariant("Failed to add song to playlist"));
    }

    Ok(())
}

/// Detach a song from a playlist
///
/// Removes every membership row for the pair; `NotFound` if there was none.
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ChorusError::not_found(
            "Playlist song",
            format!("{playlist_id}/{song_id}"),
        ));
    }

    Ok(())
}

/// Get playlist with owner username and attached songs
pub async fn get_detail(pool: &SqlitePool, id: &PlaylistId) -> Result<PlaylistDetail> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        LEFT JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ChorusError::not_found("Playlist", id.as_str()))?;

    let song_rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.rowid
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let songs = song_rows
        .into_iter()
        .map(|row| SongSummary {
            id: row.get("id"),
            title: row.get("title"),
            performer: row.get("performer"),
        })
        .collect();

    Ok(PlaylistDetail {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        songs,
    })
}
