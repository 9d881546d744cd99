//! Append-only playlist activity log

use chorus_core::{
    error::{ChorusError, Result},
    types::*,
};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::sync::atomic::{AtomicI64, Ordering};

/// Last timestamp handed out in this process, in seconds
static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time in whole seconds, never earlier than a previous call
///
/// Wall-clock steps backwards are absorbed by repeating the last value.
fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp();
    let previous = LAST_TIMESTAMP.fetch_max(now, Ordering::SeqCst);
    previous.max(now)
}

/// Append an activity record stamped with the server clock
pub async fn record(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
) -> Result<ActivityRecord> {
    let time = DateTime::from_timestamp(next_timestamp(), 0)
        .ok_or_else(|| ChorusError::storage("Clock out of range"))?;

    record_at(pool, playlist_id, song_id, user_id, action, time).await
}

/// Append an activity record with an explicit timestamp
///
/// Fails with `Invariant` if the insert returns no row.
pub async fn record_at(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
    time: DateTime<Utc>,
) -> Result<ActivityRecord> {
    let id = ActivityId::generate();

    let row = sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action, time)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(time.timestamp())
    .fetch_optional(pool)
    .await?;

    if row.is_none() {
        return Err(ChorusError::invariant("Failed to add activity"));
    }

    Ok(ActivityRecord {
        id,
        playlist_id: playlist_id.clone(),
        song_id: song_id.clone(),
        user_id: user_id.clone(),
        action,
        time,
    })
}

/// All activity for a playlist, oldest first
///
/// Ordered by `time`, ties broken by insertion order. `NotFound` if the
/// playlist does not exist.
pub async fn list_by_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<PlaylistActivity>> {
    crate::playlists::require(pool, playlist_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT a.user_id, u.username, a.song_id, s.title, a.action, a.time
        FROM playlist_song_activities a
        LEFT JOIN users u ON u.id = a.user_id
        LEFT JOIN songs s ON s.id = a.song_id
        WHERE a.playlist_id = ?
        ORDER BY a.time ASC, a.seq ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let action: String = row.get("action");
            Ok(PlaylistActivity {
                user_id: row.get("user_id"),
                username: row.get("username"),
                song_id: row.get("song_id"),
                title: row.get("title"),
                action: ActivityAction::parse(&action)
                    .ok_or_else(|| ChorusError::storage(format!("Unknown action: {action}")))?,
                time: DateTime::from_timestamp(row.get::<i64, _>("time"), 0)
                    .ok_or_else(|| ChorusError::storage("Invalid timestamp"))?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_never_go_backwards() {
        let first = next_timestamp();
        let second = next_timestamp();
        assert!(second >= first);

        // Simulate a clock that already handed out a future second
        LAST_TIMESTAMP.fetch_max(first + 3600, Ordering::SeqCst);
        assert_eq!(next_timestamp(), first + 3600);
    }
}
