/// Catalog service abstraction
use crate::error::Result;
use crate::types::{Playlist, PlaylistId, SortKey, Track, TrackId};

/// Catalog service trait
///
/// The remote source of truth for track metadata and playlist membership.
/// The playback engine never mutates catalog state directly; every mutation
/// goes through one of these calls, and local engine state is updated only
/// after the call succeeds.
///
/// Ambient operations (`playlist_tracks`, `current_track`, `next_track`,
/// `previous_track`, the ordering persistence calls, `remove_track`)
/// implicitly target the service's current playlist.
#[allow(async_fn_in_trait)]
pub trait Catalog: Send + Sync {
    // Current-playlist operations

    /// Get the ordered tracks of the current playlist
    async fn playlist_tracks(&self) -> Result<Vec<Track>>;

    /// Get the current track, if any is loaded
    async fn current_track(&self) -> Result<Option<Track>>;

    /// Advance the session and return the resulting track
    async fn next_track(&self) -> Result<Option<Track>>;

    /// Retreat the session and return the resulting track
    async fn previous_track(&self) -> Result<Option<Track>>;

    /// Persist an engine-computed random permutation as the canonical order
    async fn persist_shuffle(&self, order: &[TrackId]) -> Result<()>;

    /// Persist a sorted order for the current playlist
    async fn persist_sort(&self, key: SortKey) -> Result<()>;

    /// Persist a single-track move within the current playlist
    async fn persist_reorder(&self, track_id: &TrackId, new_index: usize) -> Result<()>;

    /// Remove a track from the current playlist
    async fn remove_track(&self, track_id: &TrackId) -> Result<()>;

    // Track bookkeeping

    /// Record a play confirmation for a track
    async fn mark_played(&self, track_id: &TrackId) -> Result<()>;

    /// Toggle the favorite flag of a track
    async fn toggle_favorite(&self, track_id: &TrackId) -> Result<()>;

    // Playlist collection operations

    /// Get all playlists
    async fn playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist
    async fn create_playlist(&self, name: &str, description: &str) -> Result<Playlist>;

    /// Mark the given playlist as the service-side current playlist
    async fn switch_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Update a playlist's name and description
    async fn update_playlist(&self, id: &PlaylistId, name: &str, description: &str) -> Result<()>;

    /// Delete a playlist
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Append a track reference to the end of a playlist
    async fn add_playlist_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
        source_playlist_id: &PlaylistId,
    ) -> Result<()>;

    /// Remove a track reference from a playlist
    async fn remove_playlist_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()>;

    // Projected views

    /// Get all favorite tracks
    async fn favorites(&self) -> Result<Vec<Track>>;

    /// Get recently played tracks, most recent first
    async fn recently_played(&self, limit: usize) -> Result<Vec<Track>>;
}
