/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audio track
///
/// Identity and creation metadata are immutable; only the favorite flag,
/// the last-played timestamp, and the play count change over a track's life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Opaque storage locator for the audio payload
    pub location: String,

    /// When the track was added to the library
    pub added_at: DateTime<Utc>,

    /// Favorite flag
    pub favorite: bool,

    /// When the track was last confirmed played, if ever
    pub last_played: Option<DateTime<Utc>>,

    /// Number of confirmed plays
    pub play_count: u32,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: String::new(),
            location: location.into(),
            added_at: Utc::now(),
            favorite: false,
            last_played: None,
            play_count: 0,
        }
    }

    /// Set the artist name (builder style)
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Whether the track has ever been confirmed played
    pub fn has_been_played(&self) -> bool {
        self.last_played.is_some()
    }
}
