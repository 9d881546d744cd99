/// Shared application state
use crate::services::{
    AccessController, AlbumLikeService, AuthService, ExportProducer, ExportService,
    PlaylistCacheCoordinator, PlaylistService,
};
use chorus_cache::CacheClient;
use chorus_storage::CollaborationRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<PlaylistCacheCoordinator>,
    pub playlists: Arc<PlaylistService>,
    pub likes: Arc<AlbumLikeService>,
    pub exports: Arc<ExportService>,
}

impl AppState {
    /// Wire the services around an open pool, cache client and export producer
    pub fn new(
        pool: SqlitePool,
        cache_client: Arc<dyn CacheClient>,
        export_producer: Arc<dyn ExportProducer>,
        auth_service: Arc<AuthService>,
        cache_ttl: Duration,
    ) -> Self {
        let registry = CollaborationRegistry::new(pool.clone());
        let access = Arc::new(AccessController::new(
            pool.clone(),
            Arc::new(registry.clone()),
        ));
        let cache = Arc::new(PlaylistCacheCoordinator::new(
            pool.clone(),
            cache_client,
            cache_ttl,
        ));

        let exports = Arc::new(ExportService::new(Arc::clone(&access), export_producer));
        let playlists = Arc::new(PlaylistService::new(
            pool.clone(),
            access,
            registry,
            Arc::clone(&cache),
        ));
        let likes = Arc::new(AlbumLikeService::new(pool.clone(), Arc::clone(&cache)));

        Self {
            pool,
            auth_service,
            cache,
            playlists,
            likes,
            exports,
        }
    }
}
