use crate::types::{AlbumPage, Artist, AudioFeatures, TrackPage};
use crate::Result;
use async_trait::async_trait;

/// Trait for Spotify Web API requests that can be mocked for testing.
///
/// Every method maps to exactly one HTTP request. Pagination, batching and
/// positional bookkeeping live on top of this trait in [`crate::iterator`] and
/// [`crate::catalog`], so a mock only has to script single responses.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockSpotifyClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait(?Send)]
pub trait SpotifyClient {
    /// Look up an artist by id.
    async fn get_artist(&self, artist_id: &str) -> Result<Artist>;

    /// Search for artists. `query` uses the service's field filter syntax, e.g. `artist:Nas`.
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>>;

    /// Get one page of an artist's albums (album group only).
    ///
    /// `cursor` is `None` for the first page and the previous page's `next` URL afterwards.
    async fn get_artist_albums_page(
        &self,
        artist_id: &str,
        cursor: Option<String>,
    ) -> Result<AlbumPage>;

    /// Get one page of an album's tracks, without audio features.
    async fn get_album_tracks_page(
        &self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Result<TrackPage>;

    /// Get audio features for up to [`MAX_AUDIO_FEATURE_IDS`](crate::client::MAX_AUDIO_FEATURE_IDS) tracks.
    ///
    /// The result has one entry per requested id in the same order; `None` marks a
    /// track the service has no analysis for.
    async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>>;
}
