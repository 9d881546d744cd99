//! Common test utilities, fixtures and test doubles
//!
//! Databases are real SQLite files in a temp dir so foreign keys and cascades
//! behave as in production.

#![allow(dead_code)]

use async_trait::async_trait;
use chorus_cache::{CacheClient, CacheError, CacheLookup, MemoryCache};
use chorus_core::{
    error::{ChorusError, Result},
    types::*,
    CollaboratorLookup,
};
use chorus_server::{
    services::{exports::ExportJob, AuthService, ChannelExportProducer},
    state::AppState,
};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{mpsc, Mutex};

pub const TEST_SECRET: &str = "test-secret-key";

/// Fully wired application over a temp database
pub struct TestContext {
    pub pool: SqlitePool,
    pub cache: Arc<dyn CacheClient>,
    pub state: AppState,
    export_jobs: Mutex<mpsc::Receiver<ExportJob>>,
    _temp_dir: TempDir,
}

impl TestContext {
    /// In-memory cache, 30 minute TTL
    pub async fn new() -> Self {
        Self::with_cache(Arc::new(MemoryCache::new()), Duration::from_secs(1800)).await
    }

    pub async fn with_cache(cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = chorus_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        chorus_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1, 1));
        let (producer, export_jobs) = ChannelExportProducer::new(16);
        let state = AppState::new(
            pool.clone(),
            Arc::clone(&cache),
            Arc::new(producer),
            auth_service,
            ttl,
        );

        Self {
            pool,
            cache,
            state,
            export_jobs: Mutex::new(export_jobs),
            _temp_dir: temp_dir,
        }
    }

    /// Export jobs published so far and not yet taken
    pub async fn take_exports(&self) -> Vec<ExportJob> {
        let mut receiver = self.export_jobs.lock().await;
        let mut jobs = Vec::new();
        while let Ok(job) = receiver.try_recv() {
            jobs.push(job);
        }
        jobs
    }

    pub fn token_for(&self, user_id: &UserId) -> String {
        self.state
            .auth_service
            .create_access_token(user_id)
            .expect("Failed to create token")
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> UserId {
    chorus_storage::users::create(pool, username, "not-a-real-hash")
        .await
        .expect("Failed to create test user")
        .id
}

pub async fn create_album(pool: &SqlitePool, name: &str) -> AlbumId {
    let id = AlbumId::generate();
    sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, 2011)")
        .bind(&id)
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to create test album");
    id
}

pub async fn create_song(pool: &SqlitePool, title: &str) -> SongId {
    let id = SongId::generate();
    sqlx::query(
        "INSERT INTO songs (id, title, year, genre, performer, duration)
         VALUES (?, ?, 2011, 'Pop', 'Adele', 228)",
    )
    .bind(&id)
    .bind(title)
    .execute(pool)
    .await
    .expect("Failed to create test song");
    id
}

pub async fn count_for_playlist(pool: &SqlitePool, table: &str, playlist_id: &PlaylistId) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE playlist_id = ?");
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(playlist_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Cache that cannot answer anything
pub struct FaultyCache;

#[async_trait]
impl CacheClient for FaultyCache {
    async fn get(&self, _key: &str) -> CacheLookup {
        CacheLookup::Fault(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> std::result::Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> std::result::Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "faulty"
    }
}

/// In-memory cache that counts deletes
#[derive(Default)]
pub struct CountingCache {
    inner: MemoryCache,
    deletes: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheClient for CountingCache {
    async fn get(&self, key: &str) -> CacheLookup {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> std::result::Result<(), CacheError> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> std::result::Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Collaborator lookup that counts calls and answers with a fixed failure
pub struct CountingLookup {
    calls: AtomicUsize,
    failure: fn() -> ChorusError,
}

impl CountingLookup {
    /// Answers "not a collaborator"
    pub fn denying() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: || ChorusError::not_found("Collaboration", "none"),
        }
    }

    /// Answers with an infrastructure failure
    pub fn broken() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: || ChorusError::Database("disk I/O error".to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollaboratorLookup for CountingLookup {
    async fn verify_collaborator(&self, _playlist_id: &PlaylistId, _user_id: &UserId) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.failure)())
    }
}
