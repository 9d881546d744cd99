//! Chorus Server Library
//!
//! Playlist backend: access control over owned and shared playlists, a
//! cache-aside layer over hot listings and like counts, and the HTTP surface
//! around them.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    AccessController, AlbumLikeService, AuthService, ExportService, PlaylistCacheCoordinator,
    PlaylistService,
};
pub use state::AppState;
