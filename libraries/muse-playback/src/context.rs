//! Playlist context bookkeeping
//!
//! `PlaylistContext` mirrors the catalog service's playlist collection and
//! owns the single-current invariant: at most one playlist carries the
//! current flag, and only this type flips it. The engine layers the remote
//! switch calls and the temporary-context serialization on top.

use muse_core::error::{MuseError, Result};
use muse_core::types::{Playlist, PlaylistId};

/// Mirror of the playlist collection with a single current playlist
#[derive(Debug, Clone, Default)]
pub struct PlaylistContext {
    playlists: Vec<Playlist>,
}

impl PlaylistContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster with a fresh service snapshot.
    ///
    /// Keeps at most one current flag; if the snapshot marks several, the
    /// first wins.
    pub fn replace_roster(&mut self, mut playlists: Vec<Playlist>) {
        let mut seen_current = false;
        for playlist in &mut playlists {
            if playlist.is_current {
                if seen_current {
                    playlist.is_current = false;
                }
                seen_current = true;
            }
        }
        self.playlists = playlists;
    }

    /// All playlists, current flag included
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Look up a playlist by ID
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == *id)
    }

    /// Check whether a playlist exists
    pub fn contains(&self, id: &PlaylistId) -> bool {
        self.get(id).is_some()
    }

    /// ID of the current playlist, if one is marked
    pub fn current_id(&self) -> Option<PlaylistId> {
        self.playlists
            .iter()
            .find(|p| p.is_current)
            .map(|p| p.id.clone())
    }

    /// Whether the given playlist is the current one
    pub fn is_current(&self, id: &PlaylistId) -> bool {
        self.get(id).map(|p| p.is_current).unwrap_or(false)
    }

    /// Mark the given playlist current and every other playlist not-current.
    ///
    /// Fails with `PlaylistNotFound` for unknown IDs, leaving flags
    /// untouched.
    pub fn set_current(&mut self, id: &PlaylistId) -> Result<()> {
        if !self.contains(id) {
            return Err(MuseError::PlaylistNotFound(id.clone()));
        }
        for playlist in &mut self.playlists {
            playlist.is_current = playlist.id == *id;
        }
        Ok(())
    }

    /// Insert a playlist, or replace the stored copy of an existing one.
    ///
    /// An updated copy keeps its stored current flag.
    pub fn upsert(&mut self, mut playlist: Playlist) {
        if let Some(existing) = self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            playlist.is_current = existing.is_current;
            *existing = playlist;
        } else {
            playlist.is_current = false;
            self.playlists.push(playlist);
        }
    }

    /// Remove a playlist from the roster
    pub fn remove(&mut self, id: &PlaylistId) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| p.id == *id)?;
        Some(self.playlists.remove(index))
    }

    /// Adjust a playlist's derived track count after a membership edit
    pub fn adjust_track_count(&mut self, id: &PlaylistId, delta: i64) {
        if let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == *id) {
            let count = i64::from(playlist.track_count) + delta;
            playlist.track_count = count.max(0) as u32;
        }
    }

    /// IDs of every playlist except the given one
    pub fn other_ids(&self, excluding: &PlaylistId) -> Vec<PlaylistId> {
        self.playlists
            .iter()
            .filter(|p| p.id != *excluding)
            .map(|p| p.id.clone())
            .collect()
    }
}
