//! Main catalog service client.

use crate::error::{CatalogClientError, Result};
use crate::types::{
    AddPlaylistTrackRequest, ApiPlaylist, ApiTrack, ClientConfig, PlaylistUpsertRequest,
    ReorderRequest, ShuffleRequest, StatusResponse,
};
use muse_core::types::{Playlist, PlaylistId, SortKey, Track, TrackId};
use muse_core::Catalog;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the Muse Player catalog service.
///
/// Implements [`Catalog`], so the playback engine can be instantiated
/// directly over it. All calls are single round trips with no automatic
/// retry; failures surface as `Service` errors and leave engine state
/// untouched.
///
/// # Example
///
/// ```ignore
/// use muse_catalog_client::{CatalogClient, ClientConfig};
/// use muse_core::Catalog;
///
/// let client = CatalogClient::new(ClientConfig::new("https://music.example.com"))?;
/// let tracks = client.playlist_tracks().await?;
/// println!("Current playlist has {} tracks", tracks.len());
/// ```
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MusePlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the service base URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, mapping connect/timeout failures to `Unreachable`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogClientError::Unreachable(e.to_string())
            } else {
                CatalogClientError::Request(e)
            }
        })
    }

    /// Parse a JSON body on success, surface the body text on failure.
    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CatalogClientError::Parse(format!("Failed to parse response: {}", e)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogClientError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Expect a command acknowledgement (`{"success": true}`).
    async fn expect_ack(response: Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            let ack: StatusResponse = response.json().await.map_err(|e| {
                CatalogClientError::Parse(format!("Failed to parse acknowledgement: {}", e))
            })?;

            if ack.success {
                Ok(())
            } else {
                Err(CatalogClientError::Status {
                    status: status.as_u16(),
                    message: ack
                        .message
                        .unwrap_or_else(|| "operation rejected".to_string()),
                })
            }
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogClientError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

impl Catalog for CatalogClient {
    async fn playlist_tracks(&self) -> muse_core::Result<Vec<Track>> {
        let url = format!("{}/api/playlist", self.base_url);
        debug!(url = %url, "Fetching current playlist tracks");

        let response = self.send(self.http.get(&url)).await?;
        let tracks: Vec<ApiTrack> = Self::parse_json(response).await?;

        debug!(tracks = tracks.len(), "Fetched current playlist tracks");
        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn current_track(&self) -> muse_core::Result<Option<Track>> {
        let url = format!("{}/api/current", self.base_url);
        debug!(url = %url, "Fetching current track");

        let response = self.send(self.http.get(&url)).await?;
        let track: Option<ApiTrack> = Self::parse_json(response).await?;
        Ok(track.map(Track::from))
    }

    async fn next_track(&self) -> muse_core::Result<Option<Track>> {
        let url = format!("{}/api/next", self.base_url);
        debug!(url = %url, "Advancing to next track");

        let response = self.send(self.http.post(&url)).await?;
        let track: Option<ApiTrack> = Self::parse_json(response).await?;
        Ok(track.map(Track::from))
    }

    async fn previous_track(&self) -> muse_core::Result<Option<Track>> {
        let url = format!("{}/api/prev", self.base_url);
        debug!(url = %url, "Retreating to previous track");

        let response = self.send(self.http.post(&url)).await?;
        let track: Option<ApiTrack> = Self::parse_json(response).await?;
        Ok(track.map(Track::from))
    }

    async fn persist_shuffle(&self, order: &[TrackId]) -> muse_core::Result<()> {
        let url = format!("{}/api/shuffle", self.base_url);
        debug!(url = %url, tracks = order.len(), "Persisting shuffled order");

        let body = ShuffleRequest {
            order: order.to_vec(),
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn persist_sort(&self, key: SortKey) -> muse_core::Result<()> {
        let url = format!("{}/api/sort/{}", self.base_url, key.as_str());
        debug!(url = %url, "Persisting sorted order");

        let response = self.send(self.http.post(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn persist_reorder(&self, track_id: &TrackId, new_index: usize) -> muse_core::Result<()> {
        let url = format!("{}/api/reorder", self.base_url);
        debug!(url = %url, track_id = %track_id, new_index, "Persisting moved order");

        let body = ReorderRequest {
            track_id: track_id.clone(),
            new_index,
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn remove_track(&self, track_id: &TrackId) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/remove/{}",
            self.base_url,
            urlencoding::encode(track_id.as_str())
        );
        debug!(url = %url, track_id = %track_id, "Removing track from current playlist");

        let response = self.send(self.http.delete(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn mark_played(&self, track_id: &TrackId) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/play/{}",
            self.base_url,
            urlencoding::encode(track_id.as_str())
        );
        debug!(url = %url, track_id = %track_id, "Recording play confirmation");

        let response = self.send(self.http.post(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn toggle_favorite(&self, track_id: &TrackId) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/favorite/{}",
            self.base_url,
            urlencoding::encode(track_id.as_str())
        );
        debug!(url = %url, track_id = %track_id, "Toggling favorite flag");

        let response = self.send(self.http.post(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn playlists(&self) -> muse_core::Result<Vec<Playlist>> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, "Fetching playlists");

        let response = self.send(self.http.get(&url)).await?;
        let playlists: Vec<ApiPlaylist> = Self::parse_json(response).await?;

        debug!(playlists = playlists.len(), "Fetched playlists");
        Ok(playlists.into_iter().map(Playlist::from).collect())
    }

    async fn create_playlist(&self, name: &str, description: &str) -> muse_core::Result<Playlist> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, name = %name, "Creating playlist");

        let body = PlaylistUpsertRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        let playlist: ApiPlaylist = Self::parse_json(response).await?;
        Ok(playlist.into())
    }

    async fn switch_playlist(&self, id: &PlaylistId) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/playlists/{}/switch",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        debug!(url = %url, playlist_id = %id, "Switching current playlist");

        let response = self.send(self.http.post(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn update_playlist(
        &self,
        id: &PlaylistId,
        name: &str,
        description: &str,
    ) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/playlists/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        debug!(url = %url, playlist_id = %id, "Updating playlist");

        let body = PlaylistUpsertRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let response = self.send(self.http.put(&url).json(&body)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/playlists/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        debug!(url = %url, playlist_id = %id, "Deleting playlist");

        let response = self.send(self.http.delete(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn add_playlist_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
        source_playlist_id: &PlaylistId,
    ) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/playlists/{}/songs",
            self.base_url,
            urlencoding::encode(playlist_id.as_str())
        );
        debug!(url = %url, track_id = %track_id, "Adding track to playlist");

        let body = AddPlaylistTrackRequest {
            song_id: track_id.clone(),
            source_playlist_id: source_playlist_id.clone(),
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn remove_playlist_track(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> muse_core::Result<()> {
        let url = format!(
            "{}/api/playlists/{}/songs/{}",
            self.base_url,
            urlencoding::encode(playlist_id.as_str()),
            urlencoding::encode(track_id.as_str())
        );
        debug!(url = %url, track_id = %track_id, "Removing track from playlist");

        let response = self.send(self.http.delete(&url)).await?;
        Ok(Self::expect_ack(response).await?)
    }

    async fn favorites(&self) -> muse_core::Result<Vec<Track>> {
        let url = format!("{}/api/favorites", self.base_url);
        debug!(url = %url, "Fetching favorites view");

        let response = self.send(self.http.get(&url)).await?;
        let tracks: Vec<ApiTrack> = Self::parse_json(response).await?;
        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn recently_played(&self, limit: usize) -> muse_core::Result<Vec<Track>> {
        let url = format!("{}/api/recent?limit={}", self.base_url, limit);
        debug!(url = %url, limit, "Fetching recently played view");

        let response = self.send(self.http.get(&url)).await?;
        let tracks: Vec<ApiTrack> = Self::parse_json(response).await?;
        Ok(tracks.into_iter().map(Track::from).collect())
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
