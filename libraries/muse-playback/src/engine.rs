//! Player engine - core orchestration
//!
//! Coordinates the track order, playback session, playlist context, and
//! projected views against the catalog service.
//!
//! Two rules govern every operation:
//!
//! - **Confirm-then-apply**: local ordering and membership state mutate only
//!   after the catalog call succeeds. A failed or timed-out round trip
//!   leaves the engine exactly as it was.
//! - **Single-flight context switches**: any flow that temporarily changes
//!   the current playlist (browsing another playlist, copying a track,
//!   scanning memberships) is serialized through one async guard. The
//!   swap-and-restore pattern is not reentrant; interleaving two of these
//!   flows would restore the wrong playlist.
//!
//! Locks are never held across a catalog round trip: state is read, the
//! service is called, and the confirmed result is applied under a fresh
//! write lock.

use crate::context::PlaylistContext;
use crate::order::TrackOrder;
use crate::session::PlaybackSession;
use crate::types::PlaybackStatus;
use crate::views::{fetch_view, ProjectedView};
use muse_core::error::{MuseError, Result};
use muse_core::types::{Playlist, PlaylistEntry, PlaylistId, SortKey, Track, TrackId};
use muse_core::Catalog;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Mutable engine state, guarded by one lock
#[derive(Debug, Default)]
struct EngineState {
    order: TrackOrder,
    session: PlaybackSession,
    context: PlaylistContext,
    active_view: Option<ProjectedView>,
}

/// Playback and playlist ordering engine
///
/// Generic over the [`Catalog`] implementation so tests can drive it with an
/// in-memory fake while production uses the HTTP client.
pub struct PlayerEngine<C: Catalog> {
    catalog: C,
    state: RwLock<EngineState>,
    /// Serializes temporary-context flows; at most one in flight
    context_guard: Mutex<()>,
}

impl<C: Catalog> PlayerEngine<C> {
    /// Create an engine over a catalog service handle.
    ///
    /// The engine starts empty; call [`refresh`](Self::refresh) to pull the
    /// initial snapshot.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: RwLock::new(EngineState::default()),
            context_guard: Mutex::new(()),
        }
    }

    /// The underlying catalog handle
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Pull a full snapshot: playlists, the current playlist's order, and
    /// the service-side current track.
    ///
    /// Intended for session start; it resets playback status to stopped.
    pub async fn refresh(&self) -> Result<()> {
        let playlists = self.catalog.playlists().await?;
        let tracks = self.catalog.playlist_tracks().await?;
        let current = self.catalog.current_track().await?;

        let mut state = self.state.write().await;
        state.context.replace_roster(playlists);
        state.order.replace(tracks);
        match current {
            Some(track) => state.session.load(track),
            None => state.session.clear(),
        }
        debug!(
            playlists = state.context.playlists().len(),
            tracks = state.order.len(),
            "Refreshed engine snapshot"
        );
        Ok(())
    }

    // === Snapshots ===

    /// Ordered tracks of the current playlist
    pub async fn current_order(&self) -> Vec<Track> {
        self.state.read().await.order.tracks().to_vec()
    }

    /// The loaded track, if any
    pub async fn current_track(&self) -> Option<Track> {
        self.state.read().await.session.current().cloned()
    }

    /// Current playback status
    pub async fn status(&self) -> PlaybackStatus {
        self.state.read().await.session.status()
    }

    /// Whether shuffle mode is on
    pub async fn shuffle_enabled(&self) -> bool {
        self.state.read().await.session.shuffle_enabled()
    }

    /// Whether repeat mode is on
    pub async fn repeat_enabled(&self) -> bool {
        self.state.read().await.session.repeat_enabled()
    }

    /// All known playlists
    pub async fn playlists(&self) -> Vec<Playlist> {
        self.state.read().await.context.playlists().to_vec()
    }

    /// ID of the current playlist, if any
    pub async fn current_playlist_id(&self) -> Option<PlaylistId> {
        self.state.read().await.context.current_id()
    }

    /// Dense membership entries of the current playlist.
    ///
    /// A track's position is its index in the confirmed order, so the
    /// sequence is always a gap-free permutation of `0..N-1`.
    pub async fn current_entries(&self) -> Vec<PlaylistEntry> {
        let state = self.state.read().await;
        let Some(playlist_id) = state.context.current_id() else {
            return Vec::new();
        };
        state
            .order
            .tracks()
            .iter()
            .enumerate()
            .map(|(position, track)| PlaylistEntry {
                playlist_id: playlist_id.clone(),
                track_id: track.id.clone(),
                position: position as u32,
                added_at: track.added_at,
            })
            .collect()
    }

    /// The active projected view, if one is showing
    pub async fn active_view(&self) -> Option<ProjectedView> {
        self.state.read().await.active_view
    }

    /// Whether a projected view is showing instead of the library
    pub async fn is_projected_view_active(&self) -> bool {
        self.state.read().await.active_view.is_some()
    }

    // === Ordering operations ===

    /// Sort the current playlist by the given key and persist the order.
    ///
    /// Returns the new sequence. Orders shorter than two tracks are already
    /// sorted and skip the round trip.
    pub async fn sort_by(&self, key: SortKey) -> Result<Vec<Track>> {
        let candidate = {
            let state = self.state.read().await;
            if state.order.len() < 2 {
                return Ok(state.order.tracks().to_vec());
            }
            state.order.sorted(key)
        };

        self.catalog.persist_sort(key).await?;

        let mut state = self.state.write().await;
        state.order.replace(candidate.clone());
        debug!(key = key.as_str(), "Applied sorted order");
        Ok(candidate)
    }

    /// Shuffle the current playlist into a new random order and persist it.
    ///
    /// The permutation is computed once; there is no stored pre-shuffle
    /// order to restore later.
    pub async fn shuffle(&self) -> Result<Vec<Track>> {
        let candidate = {
            let state = self.state.read().await;
            if state.order.len() < 2 {
                return Ok(state.order.tracks().to_vec());
            }
            state.order.shuffled()
        };

        let ids: Vec<TrackId> = candidate.iter().map(|t| t.id.clone()).collect();
        self.catalog.persist_shuffle(&ids).await?;

        let mut state = self.state.write().await;
        state.order.replace(candidate.clone());
        debug!(tracks = candidate.len(), "Applied shuffled order");
        Ok(candidate)
    }

    /// Move a track to a new index (clamped) and persist the order.
    pub async fn reorder(&self, track_id: &TrackId, new_index: usize) -> Result<Vec<Track>> {
        let candidate = {
            let state = self.state.read().await;
            state.order.reordered(track_id, new_index)?
        };

        self.catalog.persist_reorder(track_id, new_index).await?;

        let mut state = self.state.write().await;
        state.order.replace(candidate.clone());
        debug!(track_id = %track_id, new_index, "Applied moved order");
        Ok(candidate)
    }

    // === Playback ===

    /// Load a current-playlist track into the session.
    ///
    /// Local only; fails with `TrackNotFound` for non-members. The caller
    /// decides whether to start playback.
    pub async fn select_track(&self, track_id: &TrackId) -> Result<Track> {
        let mut state = self.state.write().await;
        let track = state
            .order
            .find(track_id)
            .cloned()
            .ok_or_else(|| MuseError::TrackNotFound(track_id.clone()))?;
        state.session.load(track.clone());
        Ok(track)
    }

    /// Start or resume playback (no-op with nothing loaded)
    pub async fn play(&self) {
        self.state.write().await.session.play();
    }

    /// Pause playback (no-op unless playing)
    pub async fn pause(&self) {
        self.state.write().await.session.pause();
    }

    /// Advance the session to the next track, wrapping at the end.
    ///
    /// Returns the newly loaded track, or `None` for an empty playlist.
    pub async fn next(&self) -> Result<Option<Track>> {
        if self.state.read().await.order.is_empty() {
            return Ok(None);
        }

        let track = self.catalog.next_track().await?;

        let mut state = self.state.write().await;
        match track {
            Some(track) => {
                state.session.load(track.clone());
                Ok(Some(track))
            }
            None => {
                state.session.clear();
                Ok(None)
            }
        }
    }

    /// Retreat the session to the previous track, wrapping at the start.
    pub async fn previous(&self) -> Result<Option<Track>> {
        if self.state.read().await.order.is_empty() {
            return Ok(None);
        }

        let track = self.catalog.previous_track().await?;

        let mut state = self.state.write().await;
        match track {
            Some(track) => {
                state.session.load(track.clone());
                Ok(Some(track))
            }
            None => {
                state.session.clear();
                Ok(None)
            }
        }
    }

    /// Flip shuffle mode; enabling it reshuffles the current playlist.
    ///
    /// The flag flip itself is local and always succeeds; the triggered
    /// shuffle can still fail with a service error.
    pub async fn toggle_shuffle(&self) -> Result<bool> {
        let enabled = self.state.write().await.session.toggle_shuffle();
        if enabled {
            self.shuffle().await?;
        }
        Ok(enabled)
    }

    /// Flip repeat mode; returns the new value.
    pub async fn toggle_repeat(&self) -> bool {
        self.state.write().await.session.toggle_repeat()
    }

    /// Report playback progress for the loaded track.
    ///
    /// Emits the one play confirmation per load once `elapsed` reaches the
    /// threshold while playing. The confirmation is claimed before the
    /// round trip and released again if the call fails, so a later progress
    /// report can retry without ever double-firing.
    pub async fn on_progress(&self, elapsed: Duration) -> Result<()> {
        let claimed = {
            let mut state = self.state.write().await;
            if state.session.should_confirm(elapsed) {
                state.session.confirm_play();
                state.session.current_id().cloned()
            } else {
                None
            }
        };

        let Some(track_id) = claimed else {
            return Ok(());
        };

        if let Err(err) = self.catalog.mark_played(&track_id).await {
            let mut state = self.state.write().await;
            if state.session.current_id() == Some(&track_id) {
                state.session.retract_play_confirmation();
            }
            return Err(err);
        }

        debug!(track_id = %track_id, "Play confirmed");
        Ok(())
    }

    /// Handle a track finishing unattended.
    ///
    /// With repeat on, the same track restarts from zero and keeps playing.
    /// Otherwise the session advances (wrapping) and the next track is
    /// loaded with playback intent preserved. Returns the track now playing,
    /// or `None` when nothing is.
    pub async fn on_natural_end(&self) -> Result<Option<Track>> {
        {
            let mut state = self.state.write().await;
            let Some(current) = state.session.current().cloned() else {
                return Ok(None);
            };
            if state.session.repeat_enabled() {
                state.session.restart();
                debug!(track_id = %current.id, "Repeating current track");
                return Ok(Some(current));
            }
        }

        let next = self.catalog.next_track().await?;

        let mut state = self.state.write().await;
        match next {
            Some(track) => {
                state.session.load(track.clone());
                state.session.play();
                Ok(Some(track))
            }
            None => {
                state.session.clear();
                Ok(None)
            }
        }
    }

    /// Toggle a track's favorite flag and update the local copy.
    pub async fn toggle_favorite(&self, track_id: &TrackId) -> Result<()> {
        self.catalog.toggle_favorite(track_id).await?;

        let mut state = self.state.write().await;
        if let Some(track) = state.order.find(track_id).cloned() {
            let mut updated = track;
            updated.favorite = !updated.favorite;
            state.order.update_track(updated);
        }
        Ok(())
    }

    // === Playlist context ===

    /// Make the given playlist current and load its ordering.
    ///
    /// The session's loaded track is untouched: it stays valid as long as
    /// it belongs to any playlist. Any projected view deactivates.
    pub async fn switch_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        // A manual switch must not interleave with a temporary-context flow
        let _guard = self.context_guard.lock().await;

        {
            let state = self.state.read().await;
            if !state.context.contains(playlist_id) {
                return Err(MuseError::PlaylistNotFound(playlist_id.clone()));
            }
            if state.context.is_current(playlist_id) {
                return Ok(());
            }
        }

        self.catalog.switch_playlist(playlist_id).await?;
        let tracks = self.catalog.playlist_tracks().await?;

        let mut state = self.state.write().await;
        state.context.set_current(playlist_id)?;
        state.order.replace(tracks);
        state.active_view = None;
        debug!(playlist_id = %playlist_id, "Switched current playlist");
        Ok(())
    }

    /// Run `f` with the given playlist temporarily current, restoring the
    /// previous current playlist afterwards - even when `f` fails.
    ///
    /// Serialized with every other context-switching flow: a second call
    /// waits rather than interleave and restore the wrong playlist.
    pub async fn with_temporary_context<T, F, Fut>(&self, playlist_id: &PlaylistId, f: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _guard = self.context_guard.lock().await;
        self.temporary_context_inner(playlist_id, f).await
    }

    /// Swap-and-restore without the guard; callers hold it already.
    async fn temporary_context_inner<T, F, Fut>(&self, playlist_id: &PlaylistId, f: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let restore_to = {
            let state = self.state.read().await;
            if !state.context.contains(playlist_id) {
                return Err(MuseError::PlaylistNotFound(playlist_id.clone()));
            }
            state
                .context
                .current_id()
                .ok_or_else(|| MuseError::validation("no current playlist to restore"))?
        };

        // Already current: nothing to swap
        if restore_to == *playlist_id {
            return f().await;
        }

        self.catalog.switch_playlist(playlist_id).await?;
        let result = f().await;

        // Restore even when the borrowed-context operation failed
        let restore = self.catalog.switch_playlist(&restore_to).await;
        if let Err(err) = &restore {
            warn!(playlist_id = %restore_to, error = %err, "Failed to restore current playlist");
        }

        match (result, restore) {
            (Err(err), _) => Err(err),
            (Ok(_), Err(err)) => Err(err),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    /// Read another playlist's ordered tracks without losing the caller's
    /// context. The current playlist is answered locally.
    pub async fn browse_playlist(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        {
            let state = self.state.read().await;
            if !state.context.contains(playlist_id) {
                return Err(MuseError::PlaylistNotFound(playlist_id.clone()));
            }
            if state.context.is_current(playlist_id) {
                return Ok(state.order.tracks().to_vec());
            }
        }

        self.with_temporary_context(playlist_id, || self.catalog.playlist_tracks())
            .await
    }

    /// Copy a track from one playlist into another.
    ///
    /// The source keeps its membership. Fails with `DuplicateMember` when
    /// the target already contains the track, leaving the target untouched.
    pub async fn copy_track(
        &self,
        track_id: &TrackId,
        from: &PlaylistId,
        to: &PlaylistId,
    ) -> Result<()> {
        let _guard = self.context_guard.lock().await;

        let target_is_current = {
            let state = self.state.read().await;
            if !state.context.contains(from) {
                return Err(MuseError::PlaylistNotFound(from.clone()));
            }
            if !state.context.contains(to) {
                return Err(MuseError::PlaylistNotFound(to.clone()));
            }
            state.context.is_current(to)
        };

        let target_tracks = if target_is_current {
            self.state.read().await.order.tracks().to_vec()
        } else {
            self.temporary_context_inner(to, || self.catalog.playlist_tracks())
                .await?
        };

        if target_tracks.iter().any(|t| t.id == *track_id) {
            return Err(MuseError::duplicate_member(to.clone(), track_id.clone()));
        }

        self.catalog.add_playlist_track(to, track_id, from).await?;

        if target_is_current {
            let tracks = self.catalog.playlist_tracks().await?;
            self.state.write().await.order.replace(tracks);
        }

        let mut state = self.state.write().await;
        state.context.adjust_track_count(to, 1);
        debug!(track_id = %track_id, from = %from, to = %to, "Copied track between playlists");
        Ok(())
    }

    /// Remove a track from the current playlist.
    pub async fn remove_track(&self, track_id: &TrackId) -> Result<()> {
        let current = {
            let state = self.state.read().await;
            if !state.order.contains(track_id) {
                return Err(MuseError::TrackNotFound(track_id.clone()));
            }
            state
                .context
                .current_id()
                .ok_or_else(|| MuseError::validation("no current playlist"))?
        };

        self.catalog.remove_track(track_id).await?;

        {
            let mut state = self.state.write().await;
            let _ = state.order.remove(track_id);
            state.context.adjust_track_count(&current, -1);
        }

        self.release_orphaned_session_track(track_id).await
    }

    /// Remove a track's membership entry from the given playlist.
    pub async fn remove_member(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let removed_from_current = {
            let state = self.state.read().await;
            if !state.context.contains(playlist_id) {
                return Err(MuseError::PlaylistNotFound(playlist_id.clone()));
            }
            state.context.is_current(playlist_id)
        };

        self.catalog
            .remove_playlist_track(playlist_id, track_id)
            .await?;

        {
            let mut state = self.state.write().await;
            if removed_from_current {
                let _ = state.order.remove(track_id);
            }
            state.context.adjust_track_count(playlist_id, -1);
        }

        self.release_orphaned_session_track(track_id).await
    }

    /// Clear the session pointer when its track has no membership left.
    ///
    /// The membership scan browses the other playlists under the context
    /// guard; the current playlist is answered locally.
    async fn release_orphaned_session_track(&self, track_id: &TrackId) -> Result<()> {
        let is_session_track =
            { self.state.read().await.session.current_id() == Some(track_id) };
        if !is_session_track {
            return Ok(());
        }

        if self.track_has_membership(track_id).await? {
            return Ok(());
        }

        let mut state = self.state.write().await;
        if state.session.current_id() == Some(track_id) {
            state.session.clear();
            debug!(track_id = %track_id, "Cleared session track with no remaining membership");
        }
        Ok(())
    }

    /// Whether a track belongs to any known playlist.
    async fn track_has_membership(&self, track_id: &TrackId) -> Result<bool> {
        let (in_current, other_ids) = {
            let state = self.state.read().await;
            // Without a current playlist there is no context to browse from
            let others = match state.context.current_id() {
                Some(current) => state.context.other_ids(&current),
                None => Vec::new(),
            };
            (state.order.contains(track_id), others)
        };

        if in_current {
            return Ok(true);
        }

        let _guard = self.context_guard.lock().await;
        for playlist_id in other_ids {
            let tracks = self
                .temporary_context_inner(&playlist_id, || self.catalog.playlist_tracks())
                .await?;
            if tracks.iter().any(|t| t.id == *track_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // === Playlist collection ===

    /// Create a playlist. The name must be non-empty.
    pub async fn create_playlist(&self, name: &str, description: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MuseError::validation("playlist name must not be empty"));
        }

        let playlist = self.catalog.create_playlist(name, description).await?;
        self.state.write().await.context.upsert(playlist.clone());
        debug!(playlist_id = %playlist.id, "Created playlist");
        Ok(playlist)
    }

    /// Rename a playlist and update its description.
    pub async fn update_playlist(
        &self,
        playlist_id: &PlaylistId,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MuseError::validation("playlist name must not be empty"));
        }

        let existing = {
            let state = self.state.read().await;
            state
                .context
                .get(playlist_id)
                .cloned()
                .ok_or_else(|| MuseError::PlaylistNotFound(playlist_id.clone()))?
        };

        self.catalog
            .update_playlist(playlist_id, name, description)
            .await?;

        let mut updated = existing;
        updated.name = name.to_string();
        updated.description = description.to_string();
        self.state.write().await.context.upsert(updated);
        Ok(())
    }

    /// Delete a playlist.
    ///
    /// Deleting the current playlist re-fetches the roster and adopts the
    /// service-elected replacement; the session track is cleared only if
    /// the deletion removed its last membership.
    pub async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        let was_current = {
            let state = self.state.read().await;
            if !state.context.contains(playlist_id) {
                return Err(MuseError::PlaylistNotFound(playlist_id.clone()));
            }
            state.context.is_current(playlist_id)
        };

        self.catalog.delete_playlist(playlist_id).await?;

        let _ = self.state.write().await.context.remove(playlist_id);

        if was_current {
            let playlists = self.catalog.playlists().await?;
            let tracks = self.catalog.playlist_tracks().await?;
            let mut state = self.state.write().await;
            state.context.replace_roster(playlists);
            state.order.replace(tracks);
            state.active_view = None;
        }

        let session_track = { self.state.read().await.session.current_id().cloned() };
        if let Some(track_id) = session_track {
            self.release_orphaned_session_track(&track_id).await?;
        }

        debug!(playlist_id = %playlist_id, "Deleted playlist");
        Ok(())
    }

    // === Projected views ===

    /// Show the favorites projection.
    pub async fn favorites_view(&self) -> Result<Vec<Track>> {
        let tracks = fetch_view(&self.catalog, ProjectedView::Favorites).await?;
        self.state.write().await.active_view = Some(ProjectedView::Favorites);
        Ok(tracks)
    }

    /// Show the recently-played projection.
    pub async fn recent_view(&self) -> Result<Vec<Track>> {
        let tracks = fetch_view(&self.catalog, ProjectedView::Recent).await?;
        self.state.write().await.active_view = Some(ProjectedView::Recent);
        Ok(tracks)
    }

    /// Return to the library view of the current playlist.
    pub async fn show_library(&self) {
        self.state.write().await.active_view = None;
    }
}
