/// Playlist domain types
use crate::types::{PlaylistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist summary
///
/// Membership order is carried separately (`PlaylistEntry`); `track_count`
/// is the derived size of that membership. At most one playlist in a
/// collection carries `is_current = true`; the playback engine's context
/// manager is the sole writer of that flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Number of member tracks
    pub track_count: u32,

    /// Whether this playlist is the ambient target of ordering and
    /// playback queries
    pub is_current: bool,
}

impl Playlist {
    /// Create a new, empty, non-current playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            description: String::new(),
            track_count: 0,
            is_current: false,
        }
    }

    /// Set the description (builder style)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Playlist membership entry
///
/// Positions within one playlist are dense, zero-based, and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Playlist ID
    pub playlist_id: PlaylistId,

    /// Track ID
    pub track_id: TrackId,

    /// Position in the playlist (0-indexed)
    pub position: u32,

    /// When the track was added to the playlist
    pub added_at: DateTime<Utc>,
}

impl PlaylistEntry {
    /// Create a new playlist membership entry
    pub fn new(playlist_id: PlaylistId, track_id: TrackId, position: u32) -> Self {
        Self {
            playlist_id,
            track_id,
            position,
            added_at: Utc::now(),
        }
    }
}

/// Sort key for playlist ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive lexicographic title order, ascending
    Title,
    /// Added-timestamp order, ascending
    DateAdded,
}

impl SortKey {
    /// Wire name of the sort key, as used in catalog service paths
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::DateAdded => "date",
        }
    }
}
