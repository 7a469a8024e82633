//! Read-only projected views
//!
//! Favorites and recently-played are derived orderings fetched from the
//! catalog service. They never mutate the current playlist's ordering and
//! never participate in the single-current invariant; the engine only keeps
//! a flag so navigation UI can deactivate playlist selection while a
//! projection is showing.

use muse_core::error::Result;
use muse_core::types::Track;
use muse_core::Catalog;
use serde::{Deserialize, Serialize};

/// How many tracks the recently-played view shows
pub const RECENT_VIEW_LIMIT: usize = 20;

/// A derived, read-only ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectedView {
    /// Tracks with the favorite flag set
    Favorites,
    /// Tracks with a last-played timestamp, most recent first
    Recent,
}

/// Fetch a projected view from the catalog service.
pub async fn fetch_view<C: Catalog>(catalog: &C, view: ProjectedView) -> Result<Vec<Track>> {
    match view {
        ProjectedView::Favorites => catalog.favorites().await,
        ProjectedView::Recent => catalog.recently_played(RECENT_VIEW_LIMIT).await,
    }
}
