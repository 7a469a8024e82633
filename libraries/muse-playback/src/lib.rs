//! Muse Player - Playback & Playlist Ordering Engine
//!
//! The state machine that owns track ordering, current-position tracking,
//! and play-confirmation bookkeeping for a Muse Player client, reconciled
//! against a remote catalog service.
//!
//! This crate provides:
//! - Track ordering (stable sorts, uniform shuffle, single-track reorder)
//! - Wrapping next/previous navigation over the current playlist
//! - Playback session state (stopped/playing/paused, shuffle/repeat flags)
//! - One-shot play confirmation after 3 seconds of listening
//! - Multi-playlist context switching with serialized temporary switches
//! - Read-only projected views (favorites, recently played)
//!
//! # Architecture
//!
//! The engine holds no rendering, storage, or audio concerns. It is generic
//! over the [`muse_core::Catalog`] trait: production wires in the HTTP
//! client, tests wire in an in-memory fake. Every ordering or membership
//! mutation is confirm-then-apply - local state changes only after the
//! catalog service acknowledges the call, so a failed round trip never
//! leaves the client and the service disagreeing about an order.
//!
//! # Example: ordering and navigation
//!
//! ```rust
//! use muse_core::types::{SortKey, Track};
//! use muse_playback::TrackOrder;
//!
//! let mut order = TrackOrder::from_tracks(vec![
//!     Track::new("Zebra", "music/a.mp3"),
//!     Track::new("Apple", "music/b.mp3"),
//! ]);
//!
//! // Stable, case-insensitive title sort
//! let sorted = order.sorted(SortKey::Title);
//! assert_eq!(sorted[0].title, "Apple");
//! order.replace(sorted);
//!
//! // Navigation wraps instead of stopping at the ends
//! assert_eq!(order.next_index(1), Some(0));
//! ```
//!
//! # Example: session transitions are total
//!
//! ```rust
//! use muse_playback::{PlaybackSession, PlaybackStatus};
//!
//! let mut session = PlaybackSession::new();
//!
//! // Playing with an empty library is a no-op, never an error
//! session.play();
//! assert_eq!(session.status(), PlaybackStatus::Stopped);
//! ```
//!
//! # Example: driving the engine
//!
//! ```ignore
//! use muse_catalog_client::{CatalogClient, ClientConfig};
//! use muse_playback::PlayerEngine;
//!
//! let client = CatalogClient::new(ClientConfig::new("http://localhost:5000"))?;
//! let engine = PlayerEngine::new(client);
//!
//! engine.refresh().await?;
//! engine.shuffle().await?;
//! if let Some(track) = engine.next().await? {
//!     println!("Now loaded: {}", track.title);
//! }
//! ```

mod context;
mod engine;
mod order;
mod session;
mod shuffle;
pub mod types;
mod views;

// Public exports
pub use context::PlaylistContext;
pub use engine::PlayerEngine;
pub use order::TrackOrder;
pub use session::{PlaybackSession, PLAY_CONFIRM_THRESHOLD};
pub use types::PlaybackStatus;
pub use views::{ProjectedView, RECENT_VIEW_LIMIT};
