/// Playlist domain types
use crate::types::{CollaborationId, PlaylistId, SongSummary, UserId};
use serde::{Deserialize, Serialize};

/// Playlist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Owner user ID, immutable after creation
    pub owner_id: UserId,
}

impl Playlist {
    /// Create a new playlist with a generated ID
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            owner_id,
        }
    }

    /// Whether `user_id` owns this playlist
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

/// Listing entry as served to clients and stored under `playlist:{userId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist ID
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Username of the playlist owner
    pub username: Option<String>,
}

/// Playlist with its songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    /// Playlist ID
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Username of the playlist owner
    pub username: Option<String>,

    /// Songs attached to the playlist
    pub songs: Vec<SongSummary>,
}

/// Delegation grant giving a non-owner access to one playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    /// Grant ID
    pub id: CollaborationId,

    /// Playlist the grant applies to
    pub playlist_id: PlaylistId,

    /// Grantee
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_check() {
        let owner = UserId::new("user-1");
        let playlist = Playlist::new(owner.clone(), "Road Trip");

        assert!(playlist.is_owned_by(&owner));
        assert!(!playlist.is_owned_by(&UserId::new("user-2")));
    }

    #[test]
    fn summary_wire_shape() {
        let summary = PlaylistSummary {
            id: PlaylistId::new("playlist-1"),
            name: "Road Trip".to_string(),
            username: Some("dicoding".to_string()),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": "playlist-1", "name": "Road Trip", "username": "dicoding" })
        );
    }
}
