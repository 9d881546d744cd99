/// ID types for Chorus entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx-support")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Length of the random suffix appended to generated identifiers
const SUFFIX_LEN: usize = 16;

fn random_suffix() -> String {
    let mut simple = Uuid::new_v4().simple().to_string();
    simple.truncate(SUFFIX_LEN);
    simple
}

/// Declares an opaque string identifier.
///
/// Generated ids carry a readable prefix (`playlist-3f9a...`) so that rows from
/// different tables never collide and are recognisable in logs.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "-{}"), random_suffix()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl Type<Sqlite> for $name {
            fn type_info() -> SqliteTypeInfo {
                <String as Type<Sqlite>>::type_info()
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> Encode<'q, Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<SqliteArgumentValue<'q>>,
            ) -> Result<IsNull, BoxDynError> {
                <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> Decode<'r, Sqlite> for $name {
            fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
                let s = <String as Decode<Sqlite>>::decode(value)?;
                Ok($name(s))
            }
        }
    };
}

string_id!(
    /// User identifier
    UserId,
    "user"
);

string_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

string_id!(
    /// Song identifier
    SongId,
    "song"
);

string_id!(
    /// Album identifier
    AlbumId,
    "album"
);

string_id!(
    /// Collaboration grant identifier
    CollaborationId,
    "collab"
);

string_id!(
    /// Playlist-song membership identifier
    MembershipId,
    "playlist_song"
);

string_id!(
    /// Activity record identifier
    ActivityId,
    "activity"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        let id = PlaylistId::generate();
        assert!(id.as_str().starts_with("playlist-"));
        assert_eq!(id.as_str().len(), "playlist-".len() + SUFFIX_LEN);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(CollaborationId::generate(), CollaborationId::generate());
    }

    #[test]
    fn serializes_transparently() {
        let id = UserId::new("user-abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user-abc\"");
    }
}
