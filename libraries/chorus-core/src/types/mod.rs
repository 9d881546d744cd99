//! Domain types
mod activity;
mod album;
mod ids;
mod playlist;
mod song;
mod user;

pub use activity::{ActivityAction, ActivityRecord, PlaylistActivity};
pub use album::LikeState;
pub use ids::{ActivityId, AlbumId, CollaborationId, MembershipId, PlaylistId, SongId, UserId};
pub use playlist::{Collaboration, Playlist, PlaylistDetail, PlaylistSummary};
pub use song::{Song, SongSummary};
pub use user::User;
