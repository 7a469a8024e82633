/// Core error types for Muse Player
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `MuseError`
pub type Result<T> = std::result::Result<T, MuseError>;

/// Core error type for Muse Player
#[derive(Error, Debug)]
pub enum MuseError {
    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Track is already a member of the playlist
    #[error("Track {track_id} is already in playlist {playlist_id}")]
    DuplicateMember {
        /// Playlist that already contains the track
        playlist_id: PlaylistId,
        /// The duplicated track
        track_id: TrackId,
    },

    /// Invalid input (empty required field, malformed value)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catalog service failure (network, timeout, non-2xx response)
    #[error("Catalog service error ({status}): {message}")]
    Service {
        /// HTTP-style status code, 0 when the service was unreachable
        status: u16,
        /// Failure message, surfaced to the caller verbatim
        message: String,
    },

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MuseError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a service error
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a duplicate membership error
    pub fn duplicate_member(playlist_id: PlaylistId, track_id: TrackId) -> Self {
        Self::DuplicateMember {
            playlist_id,
            track_id,
        }
    }

    /// True for errors raised by the remote catalog service
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }
}
