//! Wire format of the Spotify Web API and the parsers that turn it into crate types.

use crate::types::{Album, AlbumPage, Artist, AudioFeatures, Image, Track, TrackPage};
use crate::{Result, SpotifyError};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ApiPaging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u32>,
}

#[derive(Deserialize)]
pub struct ApiImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Deserialize)]
pub struct ApiArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Deserialize)]
pub struct ApiSearchResponse {
    pub artists: ApiPaging<ApiArtist>,
}

#[derive(Deserialize)]
pub struct ApiAlbum {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: Option<String>,
    pub total_tracks: u32,
    pub uri: String,
}

#[derive(Deserialize)]
pub struct ApiTrack {
    /// Absent for local files.
    pub id: Option<String>,
    pub name: String,
    pub duration_ms: u64,
    pub uri: String,
}

#[derive(Deserialize)]
pub struct ApiAudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Deserialize)]
pub struct ApiTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Error body of the Web API: `{"error": {"status": 404, "message": "..."}}`.
#[derive(Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

/// Error body of the accounts service: `{"error": "invalid_client", "error_description": "..."}`.
#[derive(Deserialize)]
pub struct ApiAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))
}

impl From<ApiImage> for Image {
    fn from(image: ApiImage) -> Self {
        Image {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

impl From<ApiArtist> for Artist {
    fn from(artist: ApiArtist) -> Self {
        Artist {
            id: artist.id,
            name: artist.name,
            images: artist.images.into_iter().map(Image::from).collect(),
        }
    }
}

impl TryFrom<ApiAlbum> for Album {
    type Error = SpotifyError;

    fn try_from(album: ApiAlbum) -> Result<Self> {
        let release_date =
            parse_release_date(&album.release_date, album.release_date_precision.as_deref())?;
        Ok(Album {
            name: album.name,
            release_date,
            total_tracks: album.total_tracks,
            id: album.id,
            uri: album.uri,
        })
    }
}

impl From<ApiTrack> for Track {
    fn from(track: ApiTrack) -> Self {
        Track {
            name: track.name,
            duration_secs: track.duration_ms as f64 / 1000.0,
            id: track.id.unwrap_or_default(),
            uri: track.uri,
            features: None,
        }
    }
}

/// Parse a release date of `day`, `month` or `year` precision.
///
/// Missing components default to the first month/day, so `"1994"` is 1994-01-01.
pub fn parse_release_date(date: &str, precision: Option<&str>) -> Result<NaiveDate> {
    let padded = match precision {
        Some("year") => format!("{date}-01-01"),
        Some("month") => format!("{date}-01"),
        Some(_) => date.to_string(),
        None => match date.matches('-').count() {
            0 => format!("{date}-01-01"),
            1 => format!("{date}-01"),
            _ => date.to_string(),
        },
    };

    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .map_err(|e| SpotifyError::Parse(format!("invalid release date '{date}': {e}")))
}

pub fn parse_artist_response(json: &str) -> Result<Artist> {
    let artist: ApiArtist = from_json(json)?;
    Ok(artist.into())
}

pub fn parse_search_artists_response(json: &str) -> Result<Vec<Artist>> {
    let response: ApiSearchResponse = from_json(json)?;
    Ok(response
        .artists
        .items
        .into_iter()
        .map(Artist::from)
        .collect())
}

pub fn parse_albums_page(json: &str) -> Result<AlbumPage> {
    let page: ApiPaging<ApiAlbum> = from_json(json)?;
    let albums = page
        .items
        .into_iter()
        .map(Album::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(AlbumPage {
        albums,
        next: page.next,
        total: page.total,
    })
}

pub fn parse_tracks_page(json: &str) -> Result<TrackPage> {
    let page: ApiPaging<ApiTrack> = from_json(json)?;

    Ok(TrackPage {
        tracks: page.items.into_iter().map(Track::from).collect(),
        next: page.next,
        total: page.total,
    })
}

pub fn parse_audio_features_response(json: &str) -> Result<Vec<Option<AudioFeatures>>> {
    let response: ApiAudioFeaturesResponse = from_json(json)?;
    Ok(response.audio_features)
}

pub fn parse_token_response(json: &str) -> Result<ApiTokenResponse> {
    from_json(json)
}

/// Best-effort extraction of the human readable message from an error body.
pub fn error_message(body: &str) -> Option<String> {
    if let Ok(response) = serde_json::from_str::<ApiErrorResponse>(body) {
        return Some(format!("{} {}", response.error.status, response.error.message));
    }
    serde_json::from_str::<ApiAuthErrorResponse>(body)
        .ok()
        .map(|response| match response.error_description {
            Some(description) => format!("{}: {description}", response.error),
            None => response.error,
        })
}
