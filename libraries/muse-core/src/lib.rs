//! Muse Player Core
//!
//! Domain types, error taxonomy, and the catalog abstraction for Muse Player.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine and the catalog HTTP client:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistEntry`, typed IDs
//! - **Catalog Trait**: the remote catalog service the engine reconciles against
//! - **Error Handling**: unified `MuseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use muse_core::types::{Playlist, Track};
//!
//! // Create a track
//! let track = Track::new("My Favorite Song", "music/song.mp3");
//! assert!(!track.favorite);
//!
//! // Create a playlist summary
//! let playlist = Playlist::new("Road Trip");
//! assert_eq!(playlist.track_count, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MuseError, Result};
pub use traits::Catalog;
pub use types::{Playlist, PlaylistEntry, PlaylistId, SortKey, Track, TrackId};
