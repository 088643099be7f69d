use crate::api::{
    error_message, parse_albums_page, parse_artist_response, parse_audio_features_response,
    parse_search_artists_response, parse_tracks_page,
};
use crate::credentials::Credentials;
use crate::headers::add_api_headers;
use crate::r#trait::SpotifyClient;
use crate::token::TokenManager;
use crate::{AlbumPage, Artist, AudioFeatures, Result, SpotifyError, TrackPage};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Largest page size the listing endpoints accept.
pub const PAGE_LIMIT: u32 = 50;

/// Most track ids the audio-features endpoint accepts per request.
pub const MAX_AUDIO_FEATURE_IDS: usize = 100;

/// Client for the Spotify Web API.
///
/// Wraps any [`HttpClient`] implementation, authenticates with the
/// client-credentials flow and issues exactly one HTTP request per trait method.
/// Nothing is retried: transport failures, rate limits and error statuses go
/// straight back to the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use artist_stats::{Credentials, SpotifyClient, SpotifyClientImpl};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = SpotifyClientImpl::new(Box::new(http_client), Credentials::load()?);
///
/// let artist = client.get_artist("20qISvAhX20dpIbOOzGK3q").await?;
/// println!("{}", artist.name);
/// # Ok::<(), artist_stats::SpotifyError>(())
/// # });
/// ```
pub struct SpotifyClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    api_url: String,
    tokens: TokenManager,
}

impl SpotifyClientImpl {
    /// Create a new [`SpotifyClientImpl`] talking to the public Spotify endpoints.
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, credentials: Credentials) -> Self {
        Self::with_base_urls(
            client,
            credentials,
            DEFAULT_API_URL.to_string(),
            DEFAULT_ACCOUNTS_URL.to_string(),
        )
    }

    /// Create a new [`SpotifyClientImpl`] with custom base URLs.
    ///
    /// This is useful for testing against a local stand-in for the service.
    pub fn with_base_urls(
        client: Box<dyn HttpClient + Send + Sync>,
        credentials: Credentials,
        api_url: String,
        accounts_url: String,
    ) -> Self {
        let client: Arc<dyn HttpClient + Send + Sync> = Arc::from(client);
        Self {
            tokens: TokenManager::new(client.clone(), accounts_url, credentials),
            client,
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue an authenticated GET and return the response body.
    async fn get_json(&self, url: &str) -> Result<String> {
        let access_token = self.tokens.access_token().await?;

        let parsed = url
            .parse::<Url>()
            .map_err(|e| SpotifyError::Upstream(format!("invalid URL {url}: {e}")))?;
        let mut request = Request::new(Method::Get, parsed);
        add_api_headers(&mut request, &access_token);

        log::debug!("GET {url}");
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| SpotifyError::Upstream(e.to_string()))?;

        let status: u16 = response.status().into();
        let retry_after = response
            .header("retry-after")
            .and_then(|h| h.get(0))
            .and_then(|v| v.as_str().parse::<u64>().ok());
        let body = response
            .body_string()
            .await
            .map_err(|e| SpotifyError::Upstream(e.to_string()))?;

        log::debug!("GET {url} -> {status}");
        check_status(url, status, retry_after, &body)?;
        Ok(body)
    }

    fn first_albums_page_url(&self, artist_id: &str) -> String {
        format!(
            "{}/artists/{}/albums?include_groups=album&limit={PAGE_LIMIT}",
            self.api_url,
            urlencoding::encode(artist_id)
        )
    }

    fn first_tracks_page_url(&self, album_id: &str) -> String {
        format!(
            "{}/albums/{}/tracks?limit={PAGE_LIMIT}",
            self.api_url,
            urlencoding::encode(album_id)
        )
    }
}

/// Map a response status onto the error taxonomy.
///
/// 429 becomes [`SpotifyError::RateLimit`] (defaulting to 60 seconds without a
/// `Retry-After` header), 401 [`SpotifyError::Auth`], 404 [`SpotifyError::NotFound`],
/// and any other non-success status [`SpotifyError::Upstream`].
pub fn check_status(url: &str, status: u16, retry_after: Option<u64>, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = error_message(body).unwrap_or_else(|| format!("status {status}"));
    Err(match status {
        429 => SpotifyError::RateLimit {
            retry_after: retry_after.unwrap_or(60),
        },
        401 => SpotifyError::Auth(message),
        404 => SpotifyError::NotFound(format!("{url}: {message}")),
        _ => SpotifyError::Upstream(format!("{url} failed: {message}")),
    })
}

#[async_trait(?Send)]
impl SpotifyClient for SpotifyClientImpl {
    async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        let url = format!(
            "{}/artists/{}",
            self.api_url,
            urlencoding::encode(artist_id)
        );
        let body = self.get_json(&url).await?;
        parse_artist_response(&body)
    }

    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        let url = format!(
            "{}/search?q={}&type=artist",
            self.api_url,
            urlencoding::encode(query)
        );
        let body = self.get_json(&url).await?;
        parse_search_artists_response(&body)
    }

    async fn get_artist_albums_page(
        &self,
        artist_id: &str,
        cursor: Option<String>,
    ) -> Result<AlbumPage> {
        let url = cursor.unwrap_or_else(|| self.first_albums_page_url(artist_id));
        let body = self.get_json(&url).await?;
        parse_albums_page(&body)
    }

    async fn get_album_tracks_page(
        &self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Result<TrackPage> {
        let url = cursor.unwrap_or_else(|| self.first_tracks_page_url(album_id));
        let body = self.get_json(&url).await?;
        parse_tracks_page(&body)
    }

    async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = track_ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/audio-features?ids={ids}", self.api_url);
        let body = self.get_json(&url).await?;
        let features = parse_audio_features_response(&body)?;

        if features.len() != track_ids.len() {
            return Err(SpotifyError::Parse(format!(
                "requested audio features for {} tracks, received {}",
                track_ids.len(),
                features.len()
            )));
        }
        Ok(features)
    }
}
