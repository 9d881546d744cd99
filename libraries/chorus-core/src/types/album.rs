/// Album like state
use serde::{Deserialize, Serialize};

/// Whether a user currently likes an album
///
/// The only durable state is the existence of a `(user, album)` row; counts
/// are always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    /// A like grant exists
    Liked,
    /// No like grant exists
    NotLiked,
}

impl LikeState {
    /// The state after toggling
    pub fn toggled(self) -> Self {
        match self {
            LikeState::Liked => LikeState::NotLiked,
            LikeState::NotLiked => LikeState::Liked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_is_identity() {
        assert_eq!(LikeState::NotLiked.toggled().toggled(), LikeState::NotLiked);
        assert_eq!(LikeState::Liked.toggled(), LikeState::NotLiked);
    }
}
