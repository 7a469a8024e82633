//! Types for catalog service API requests and responses.

use chrono::{DateTime, Utc};
use muse_core::types::{Playlist, PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a catalog service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://music.example.com")
    pub url: String,
}

impl ClientConfig {
    /// Create a new client config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

// =============================================================================
// Library Types
// =============================================================================

/// A track as returned by the catalog service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub file_path: String,
    pub added_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub last_played: Option<DateTime<Utc>>,
    pub play_count: u32,
}

impl From<ApiTrack> for Track {
    fn from(api: ApiTrack) -> Self {
        Track {
            id: TrackId::new(api.id),
            title: api.title,
            artist: api.artist,
            location: api.file_path,
            added_at: api.added_at,
            favorite: api.is_favorite,
            last_played: api.last_played,
            play_count: api.play_count,
        }
    }
}

/// A playlist as returned by the catalog service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub track_count: u32,
    #[serde(default)]
    pub is_current: bool,
}

impl From<ApiPlaylist> for Playlist {
    fn from(api: ApiPlaylist) -> Self {
        Playlist {
            id: PlaylistId::new(api.id),
            name: api.name,
            description: api.description,
            track_count: api.track_count,
            is_current: api.is_current,
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Request body for persisting a shuffled order.
#[derive(Debug, Serialize)]
pub struct ShuffleRequest {
    pub order: Vec<TrackId>,
}

/// Request body for moving one track to a new index.
#[derive(Debug, Serialize)]
pub struct ReorderRequest {
    pub track_id: TrackId,
    pub new_index: usize,
}

/// Request body for creating or updating a playlist.
#[derive(Debug, Serialize)]
pub struct PlaylistUpsertRequest {
    pub name: String,
    pub description: String,
}

/// Request body for cross-playlist membership addition.
#[derive(Debug, Serialize)]
pub struct AddPlaylistTrackRequest {
    pub song_id: TrackId,
    pub source_playlist_id: PlaylistId,
}

// =============================================================================
// Response Types
// =============================================================================

/// Generic command acknowledgement from the service.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
