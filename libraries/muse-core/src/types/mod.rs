//! Domain types for Muse Player

mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use playlist::{Playlist, PlaylistEntry, SortKey};
pub use track::Track;
