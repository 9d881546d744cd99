/// Playlist activity types
use crate::types::{ActivityId, PlaylistId, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership change recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Song attached to the playlist
    Add,
    /// Song removed from the playlist
    Delete,
}

impl ActivityAction {
    /// Convert action to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }

    /// Parse action from its stored form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(ActivityAction::Add),
            "delete" => Some(ActivityAction::Delete),
            _ => None,
        }
    }
}

/// Immutable activity log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Record ID
    pub id: ActivityId,

    /// Playlist the change applied to
    pub playlist_id: PlaylistId,

    /// Song added or removed
    pub song_id: SongId,

    /// Acting user
    pub user_id: UserId,

    /// What happened
    pub action: ActivityAction,

    /// Server-generated timestamp, second resolution
    pub time: DateTime<Utc>,
}

/// Activity entry as listed for a playlist, with actor and song resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistActivity {
    /// Acting user
    pub user_id: UserId,

    /// Acting user's username, if the user still exists
    pub username: Option<String>,

    /// Song added or removed
    pub song_id: SongId,

    /// Song title, if the song still exists
    pub title: Option<String>,

    /// What happened
    pub action: ActivityAction,

    /// When it happened
    pub time: DateTime<Utc>,
}
