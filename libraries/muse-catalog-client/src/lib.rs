//! Muse Player Catalog Client
//!
//! HTTP client library for the Muse Player catalog service.
//!
//! The catalog service is the source of truth for track metadata and
//! playlist membership; this crate turns its HTTP surface into the
//! [`muse_core::Catalog`] trait the playback engine consumes.
//!
//! # Features
//!
//! - **Ordering persistence**: shuffle/sort/reorder confirmation calls
//! - **Playlist management**: CRUD, context switch, cross-playlist edits
//! - **Projected views**: favorites and recently-played fetches
//! - **Failure mapping**: timeouts and unreachable hosts are distinguished
//!   from explicit service rejections
//!
//! # Example
//!
//! ```ignore
//! use muse_catalog_client::{CatalogClient, ClientConfig};
//! use muse_core::Catalog;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("http://localhost:5000"))?;
//!
//!     let tracks = client.playlist_tracks().await?;
//!     println!("Current playlist has {} tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{CatalogClientError, Result};
pub use types::{ApiPlaylist, ApiTrack, ClientConfig, StatusResponse};
