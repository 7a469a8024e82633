//! Playback session state machine
//!
//! Tracks the loaded track, the stopped/playing/paused status, the shuffle
//! and repeat flags, and the play-confirmation bookkeeping. Every transition
//! is total: operations on an empty session degrade to no-ops so the UI
//! stays responsive with an empty library.

use crate::types::PlaybackStatus;
use muse_core::types::{Track, TrackId};
use std::time::Duration;

/// Seconds of playback after which a track counts as genuinely listened to
pub const PLAY_CONFIRM_THRESHOLD: Duration = Duration::from_secs(3);

/// Per-client playback session
///
/// Created once per client session. The current-track pointer is replaced by
/// loads and cleared when its track loses its last playlist membership; it
/// is global, not scoped to the current playlist.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    current: Option<Track>,
    status: PlaybackStatus,
    shuffle_enabled: bool,
    repeat_enabled: bool,
    play_confirmed: bool,
}

impl PlaybackSession {
    /// Create a fresh session with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded track, if any
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// ID of the loaded track, if any
    pub fn current_id(&self) -> Option<&TrackId> {
        self.current.as_ref().map(|t| &t.id)
    }

    /// Current playback status
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Whether shuffle mode is on
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Whether repeat mode is on
    pub fn repeat_enabled(&self) -> bool {
        self.repeat_enabled
    }

    /// Whether the loaded track's play has already been confirmed
    pub fn play_confirmed(&self) -> bool {
        self.play_confirmed
    }

    /// Load a track.
    ///
    /// Playback stops (the caller decides autoplay) and the play
    /// confirmation resets for the new load.
    pub fn load(&mut self, track: Track) {
        self.current = Some(track);
        self.status = PlaybackStatus::Stopped;
        self.play_confirmed = false;
    }

    /// Drop the loaded track.
    pub fn clear(&mut self) {
        self.current = None;
        self.status = PlaybackStatus::Stopped;
        self.play_confirmed = false;
    }

    /// Start or resume playback. No-op when nothing is loaded or already
    /// playing.
    pub fn play(&mut self) {
        if self.current.is_some() {
            self.status = PlaybackStatus::Playing;
        }
    }

    /// Pause playback. No-op unless currently playing.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Restart the loaded track from position zero for a repeat cycle.
    ///
    /// Status stays `Playing`; the replay is a fresh load as far as play
    /// confirmation is concerned.
    pub fn restart(&mut self) {
        if self.current.is_some() {
            self.status = PlaybackStatus::Playing;
            self.play_confirmed = false;
        }
    }

    /// Flip the shuffle flag; returns the new value.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_enabled = !self.shuffle_enabled;
        self.shuffle_enabled
    }

    /// Flip the repeat flag; returns the new value.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat_enabled = !self.repeat_enabled;
        self.repeat_enabled
    }

    /// Whether a progress report at `elapsed` should emit the one play
    /// confirmation for this load.
    ///
    /// True once the threshold is reached while still playing, and only
    /// until the confirmation is claimed. A pause/resume cycle that
    /// straddles the threshold therefore fires exactly once.
    pub fn should_confirm(&self, elapsed: Duration) -> bool {
        self.current.is_some()
            && self.status == PlaybackStatus::Playing
            && !self.play_confirmed
            && elapsed >= PLAY_CONFIRM_THRESHOLD
    }

    /// Claim the play confirmation for this load.
    pub fn confirm_play(&mut self) {
        self.play_confirmed = true;
    }

    /// Release a claimed confirmation after the catalog call failed, so a
    /// later progress report can emit it.
    pub fn retract_play_confirmation(&mut self) {
        self.play_confirmed = false;
    }
}
