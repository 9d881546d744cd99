//! Chorus Core
//!
//! Domain types, identifiers, and error handling shared by every Chorus crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Song`, `Collaboration`, `ActivityRecord`, etc.
//! - **Seams**: `CollaboratorLookup`, the delegation check consumed by access control
//! - **Error Handling**: Unified `ChorusError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chorus_core::types::{PlaylistId, UserId, ActivityAction};
//!
//! let owner = UserId::new("user-1");
//! let playlist = PlaylistId::generate();
//!
//! assert!(playlist.as_str().starts_with("playlist-"));
//! assert_eq!(ActivityAction::Add.as_str(), "add");
//! # let _ = owner;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{ChorusError, Result};
pub use traits::CollaboratorLookup;

pub use types::{
    ActivityAction, ActivityId, ActivityRecord, AlbumId, Collaboration, CollaborationId,
    LikeState, MembershipId, Playlist, PlaylistActivity, PlaylistDetail, PlaylistId,
    PlaylistSummary, Song, SongId, SongSummary, User, UserId,
};
