//! Chorus Storage
//!
//! `SQLite` persistence layer for Chorus: the relational source of truth behind
//! the playlist cache.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`playlists`,
//!   `collaborations`, `activities`, `albums`, `songs`, `users`)
//! - **Referential integrity in the store**: cascades and uniqueness are
//!   foreign keys and constraints, not application code
//! - **Explicit clients**: callers construct the pool and pass it in
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus_core::types::UserId;
//! use chorus_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chorus.db").await?;
//! run_migrations(&pool).await?;
//!
//! let owner = UserId::new("user-1");
//! let playlist_id = chorus_storage::playlists::create(&pool, "Road Trip", &owner).await?;
//! # let _ = playlist_id;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod activities;
pub mod albums;
pub mod collaborations;
pub mod playlists;
pub mod songs;
pub mod users;

pub use collaborations::CollaborationRegistry;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any slice is used.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://chorus.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    create_pool_with(database_url, 5).await
}

/// Create a new `SQLite` pool with an explicit connection limit
pub async fn create_pool_with(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Cascades on playlists, users and albums depend on this
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!(max_connections, "SQLite pool ready");

    Ok(pool)
}
