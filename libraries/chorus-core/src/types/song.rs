/// Song domain types
use crate::types::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// Song row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song ID
    pub id: SongId,

    /// Title
    pub title: String,

    /// Performer
    pub performer: String,

    /// Album the song belongs to, if any
    pub album_id: Option<AlbumId>,
}

/// Compact song projection used inside playlist details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    /// Song ID
    pub id: SongId,

    /// Title
    pub title: String,

    /// Performer
    pub performer: String,
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            performer: song.performer,
        }
    }
}
