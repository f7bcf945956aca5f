//! Strongly typed identifiers.
//!
//! Using newtypes instead of bare strings/uuids avoids brittle key matching
//! and keeps carousel rows and modal records scoped to the item they belong
//! to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed id for a media item (movie or series).
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct MediaId(pub Uuid);

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaId {
    pub fn new() -> Self {
        MediaId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media classification forwarded to the routing collaborator when a detail
/// panel opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Series,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// Key of a modal record in the registry. One key per grid item; the same
/// item may be opened as a mini card or a detail panel over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalKey(pub MediaId);

impl From<MediaId> for ModalKey {
    fn from(id: MediaId) -> Self {
        ModalKey(id)
    }
}

impl std::fmt::Display for ModalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
