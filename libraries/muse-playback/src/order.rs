//! Ordered track sequence for the current playlist
//!
//! `TrackOrder` is the engine's canonical copy of the current playlist's
//! ordering. Mutating operations come in two halves: a pure computation
//! that produces a candidate sequence (`sorted`, `reordered`, or a shuffle
//! from the `shuffle` module) and `replace`, which the engine calls only
//! after the catalog service has confirmed the new order.

use crate::shuffle;
use muse_core::error::{MuseError, Result};
use muse_core::types::{SortKey, Track, TrackId};

/// Ordered sequence of the current playlist's tracks
///
/// Positions are implicit: a track's index in the sequence IS its playlist
/// position, so the dense zero-based position invariant holds by
/// construction.
#[derive(Debug, Clone, Default)]
pub struct TrackOrder {
    tracks: Vec<Track>,
}

impl TrackOrder {
    /// Create an empty order
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Create an order from an already-ordered track list
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// The ordered tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the order is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get the track at an index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Find a track by ID
    pub fn find(&self, track_id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == *track_id)
    }

    /// Position of a track in the order
    pub fn index_of(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == *track_id)
    }

    /// Check membership by track ID
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.index_of(track_id).is_some()
    }

    /// IDs in order
    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }

    /// Index of the track after `current`, wrapping at the end.
    ///
    /// Returns `None` only when the order is empty.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let current = current.min(self.tracks.len() - 1);
        Some((current + 1) % self.tracks.len())
    }

    /// Index of the track before `current`, wrapping at the start.
    ///
    /// Returns `None` only when the order is empty.
    pub fn prev_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        let current = current.min(len - 1);
        Some((current + len - 1) % len)
    }

    /// Compute the sequence sorted by the given key.
    ///
    /// Both keys sort ascending and stably, so equal-key tracks keep their
    /// prior relative order.
    pub fn sorted(&self, key: SortKey) -> Vec<Track> {
        let mut tracks = self.tracks.clone();
        match key {
            SortKey::Title => tracks.sort_by_key(|t| t.title.to_lowercase()),
            SortKey::DateAdded => tracks.sort_by_key(|t| t.added_at),
        }
        tracks
    }

    /// Compute a uniformly shuffled sequence.
    pub fn shuffled(&self) -> Vec<Track> {
        shuffle::shuffled(&self.tracks)
    }

    /// Compute the sequence with one track moved to `new_index`.
    ///
    /// `new_index` is clamped to `[0, N-1]`; intervening tracks shift by one
    /// position and keep their relative order. Fails with `TrackNotFound` if
    /// the track is not a member.
    pub fn reordered(&self, track_id: &TrackId, new_index: usize) -> Result<Vec<Track>> {
        let from = self
            .index_of(track_id)
            .ok_or_else(|| MuseError::TrackNotFound(track_id.clone()))?;

        let mut tracks = self.tracks.clone();
        let track = tracks.remove(from);
        let clamped = new_index.min(tracks.len());
        tracks.insert(clamped, track);
        Ok(tracks)
    }

    /// Replace the whole sequence with a confirmed order.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Remove a track locally after the service confirmed the removal.
    ///
    /// The `Vec` removal re-densifies the implicit positions.
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let index = self.index_of(track_id)?;
        Some(self.tracks.remove(index))
    }

    /// Update a track's metadata in place, if it is a member.
    pub fn update_track(&mut self, track: Track) {
        if let Some(index) = self.index_of(&track.id) {
            self.tracks[index] = track;
        }
    }
}
