//! User accounts and credentials

use crate::StorageError;
use chorus_core::types::{User, UserId};
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

/// Create a user with an already-hashed password
///
/// Fails with `Duplicate` if the username is taken.
pub async fn create(pool: &SqlitePool, username: &str, password_hash: &str) -> Result<User> {
    let id = UserId::generate();

    let result = sqlx::query("INSERT INTO users (id, username, password_hash) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(User {
            id,
            username: username.to_string(),
        }),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
            StorageError::Duplicate(format!("username already taken: {username}")),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Look up a user and their password hash by username
///
/// # Returns
///
/// Returns `None` if no such user exists
pub async fn get_credentials(pool: &SqlitePool, username: &str) -> Result<Option<(User, String)>> {
    let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| {
        (
            User {
                id: row.get("id"),
                username: row.get("username"),
            },
            row.get("password_hash"),
        )
    }))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
        })
        .collect())
}

/// Delete a user; their playlists, grants and likes cascade
pub async fn delete(pool: &SqlitePool, id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("User", id.as_str()));
    }

    Ok(())
}
