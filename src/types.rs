//! Data types for Spotify catalog metadata and derived artist statistics.
//!
//! This module contains the core data structures used throughout the crate:
//! artist, album and track records as returned by the Web API, the fixed set of
//! audio features, and the per-artist summary the aggregation produces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ================================================================================================
// ARTIST, ALBUM AND TRACK METADATA
// ================================================================================================

/// An image variant attached to an artist or album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// An artist as returned by lookup or search.
///
/// `images` keeps the service order, which is widest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
}

impl Artist {
    /// The narrowest image variant available, if any.
    pub fn smallest_image(&self) -> Option<&Image> {
        self.images.last()
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One album owned by an artist.
///
/// # Examples
///
/// ```rust
/// use artist_stats::Album;
/// use chrono::NaiveDate;
///
/// let album = Album {
///     name: "Illmatic".to_string(),
///     release_date: NaiveDate::from_ymd_opt(1994, 4, 19).unwrap(),
///     total_tracks: 10,
///     id: "3kEtdS2pH6hKcMU9Wioob1".to_string(),
///     uri: "spotify:album:3kEtdS2pH6hKcMU9Wioob1".to_string(),
/// };
///
/// assert_eq!(format!("{album}"), "Illmatic (1994-04-19, 10 tracks)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub release_date: NaiveDate,
    pub total_tracks: u32,
    pub id: String,
    pub uri: String,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} tracks)",
            self.name, self.release_date, self.total_tracks
        )
    }
}

/// One page of an artist's album listing.
///
/// `next` is the service's absolute URL for the following page, `None` on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumPage {
    pub albums: Vec<Album>,
    pub next: Option<String>,
    pub total: Option<u32>,
}

/// A track on an album.
///
/// Tracks come back from the album listing without audio features; the
/// aggregator attaches them afterwards with [`Track::with_features`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub duration_secs: f64,
    pub id: String,
    pub uri: String,
    pub features: Option<AudioFeatures>,
}

impl Track {
    pub fn with_features(mut self, features: AudioFeatures) -> Self {
        self.features = Some(features);
        self
    }

    /// Local files in a listing carry no catalog id and have no audio features.
    pub fn is_local(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.duration_secs.round() as u64;
        write!(f, "{} [{}:{:02}]", self.name, secs / 60, secs % 60)
    }
}

/// One page of an album's track listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub next: Option<String>,
    pub total: Option<u32>,
}

// ================================================================================================
// AUDIO FEATURES
// ================================================================================================

/// The fixed set of scalar audio descriptors the service reports per track.
///
/// Declaration order is the column order used by the CSV dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFeature {
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
}

impl AudioFeature {
    pub const COUNT: usize = 11;

    pub const ALL: [AudioFeature; AudioFeature::COUNT] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Key,
        AudioFeature::Loudness,
        AudioFeature::Mode,
        AudioFeature::Speechiness,
        AudioFeature::Acousticness,
        AudioFeature::Instrumentalness,
        AudioFeature::Liveness,
        AudioFeature::Valence,
        AudioFeature::Tempo,
    ];

    /// The service's field name for this feature.
    pub fn name(self) -> &'static str {
        match self {
            AudioFeature::Danceability => "danceability",
            AudioFeature::Energy => "energy",
            AudioFeature::Key => "key",
            AudioFeature::Loudness => "loudness",
            AudioFeature::Mode => "mode",
            AudioFeature::Speechiness => "speechiness",
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Liveness => "liveness",
            AudioFeature::Valence => "valence",
            AudioFeature::Tempo => "tempo",
        }
    }

    /// Position of this feature in [`AudioFeature::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AudioFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        AudioFeature::ALL
            .into_iter()
            .find(|feature| feature.name() == lowered)
            .ok_or_else(|| format!("unknown audio feature '{s}'"))
    }
}

/// Audio feature values for one track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: f64,
    pub loudness: f64,
    pub mode: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
}

impl AudioFeatures {
    pub fn get(&self, feature: AudioFeature) -> f64 {
        match feature {
            AudioFeature::Danceability => self.danceability,
            AudioFeature::Energy => self.energy,
            AudioFeature::Key => self.key,
            AudioFeature::Loudness => self.loudness,
            AudioFeature::Mode => self.mode,
            AudioFeature::Speechiness => self.speechiness,
            AudioFeature::Acousticness => self.acousticness,
            AudioFeature::Instrumentalness => self.instrumentalness,
            AudioFeature::Liveness => self.liveness,
            AudioFeature::Valence => self.valence,
            AudioFeature::Tempo => self.tempo,
        }
    }

    /// All values in [`AudioFeature::ALL`] order.
    pub fn values(&self) -> [f64; AudioFeature::COUNT] {
        AudioFeature::ALL.map(|feature| self.get(feature))
    }
}

// ================================================================================================
// DERIVED STATISTICS
// ================================================================================================

/// Central tendency and dispersion of one feature across an artist's albums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f64,
    /// Average within-album standard deviation.
    pub volatility: f64,
}

/// Per-artist statistical summary, one row of the CSV dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSummary {
    /// Mean gap between consecutive album releases, in days.
    pub av_time_btwn_release: f64,
    pub total_albums: usize,
    pub track_per_album: f64,
    pub image_url: String,
    /// Indexed by [`AudioFeature::index`].
    pub features: [FeatureStats; AudioFeature::COUNT],
    pub classic: bool,
}

impl ArtistSummary {
    pub fn feature(&self, feature: AudioFeature) -> FeatureStats {
        self.features[feature.index()]
    }
}
