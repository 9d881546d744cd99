/// Server services
pub mod access;
pub mod auth;
pub mod cache;
pub mod exports;
pub mod likes;
pub mod playlists;

pub use access::{AccessController, AccessGrant};
pub use auth::{AuthService, TokenPair};
pub use cache::PlaylistCacheCoordinator;
pub use exports::{ChannelExportProducer, ExportProducer, ExportService};
pub use likes::AlbumLikeService;
pub use playlists::PlaylistService;
