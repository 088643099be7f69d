//! Per-artist aggregation: fetch an artist's discography, attach audio features
//! to every track and reduce everything to one [`ArtistSummary`].

use crate::artists::ArtistReference;
use crate::catalog::{fetch_albums, fetch_artist_image, fetch_audio_features, fetch_tracks};
use crate::dataset::Dataset;
use crate::r#trait::SpotifyClient;
use crate::stats::{artist_feature_stats, average_release_gap_days, mean};
use crate::types::{Album, ArtistSummary, AudioFeatures, Track};
use crate::{Result, SpotifyError};

/// One album with its tracks, audio features attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumTracks {
    pub album: Album,
    pub tracks: Vec<Track>,
}

impl AlbumTracks {
    /// Audio features of the tracks that have them, in track order.
    pub fn features(&self) -> Vec<AudioFeatures> {
        self.tracks.iter().filter_map(|t| t.features).collect()
    }
}

/// An artist's albums, one entry per distinct album name, in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discography {
    pub albums: Vec<AlbumTracks>,
}

impl Discography {
    pub fn album(&self, name: &str) -> Option<&AlbumTracks> {
        self.albums.iter().find(|entry| entry.album.name == name)
    }

    pub fn album_names(&self) -> impl Iterator<Item = &str> {
        self.albums.iter().map(|entry| entry.album.name.as_str())
    }
}

/// What the pipeline driver does when one artist fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log the error and leave the artist out of the dataset.
    Skip,
}

/// Index albums by display name.
///
/// A later album with an already seen name replaces the earlier one, keeping the
/// earlier one's position, so the result holds exactly one album per distinct name.
pub fn index_albums_by_name(albums: Vec<Album>) -> Vec<Album> {
    let mut indexed: Vec<Album> = Vec::with_capacity(albums.len());
    for album in albums {
        match indexed.iter_mut().find(|seen| seen.name == album.name) {
            Some(seen) => {
                log::debug!(
                    "Album name '{}' listed twice, keeping {} over {}",
                    album.name,
                    album.id,
                    seen.id
                );
                *seen = album;
            }
            None => indexed.push(album),
        }
    }
    indexed
}

/// Fetch every album of an artist with its tracks and their audio features.
///
/// Each album's advertised track count is checked against the tracks actually
/// listed; a mismatch fails with [`SpotifyError::PartialFetch`]. Local files
/// count towards that check but are then dropped, since they have no features.
pub async fn gather_discography<C>(client: &C, artist_id: &str) -> Result<Discography>
where
    C: SpotifyClient + ?Sized,
{
    let albums = index_albums_by_name(fetch_albums(client, artist_id).await?);
    let mut discography = Discography {
        albums: Vec::with_capacity(albums.len()),
    };

    for album in albums {
        let shells = fetch_tracks(client, &album.id).await?;
        if shells.len() != album.total_tracks as usize {
            return Err(SpotifyError::PartialFetch {
                album: album.name,
                expected: album.total_tracks,
                fetched: shells.len(),
            });
        }

        let (catalog, local): (Vec<Track>, Vec<Track>) =
            shells.into_iter().partition(|t| !t.is_local());
        for track in &local {
            log::warn!(
                "Leaving local file '{}' on '{}' out of the audio features",
                track.name,
                album.name
            );
        }

        let ids: Vec<String> = catalog.iter().map(|t| t.id.clone()).collect();
        let features = fetch_audio_features(client, &ids).await?;
        let tracks = catalog
            .into_iter()
            .zip(features)
            .map(|(track, features)| track.with_features(features))
            .collect();

        discography.albums.push(AlbumTracks { album, tracks });
    }

    Ok(discography)
}

/// Reduce a discography to the per-artist summary.
pub fn summarize(
    discography: &Discography,
    image_url: &str,
    classic: bool,
) -> Result<ArtistSummary> {
    let dates: Vec<_> = discography
        .albums
        .iter()
        .map(|entry| entry.album.release_date)
        .collect();
    let av_time_btwn_release = average_release_gap_days(&dates)?;

    let track_counts: Vec<f64> = discography
        .albums
        .iter()
        .map(|entry| entry.album.total_tracks as f64)
        .collect();
    let track_per_album = mean(&track_counts)
        .ok_or_else(|| SpotifyError::InsufficientData("artist has no albums".to_string()))?;

    let per_album: Vec<Vec<AudioFeatures>> =
        discography.albums.iter().map(AlbumTracks::features).collect();
    let features = artist_feature_stats(per_album.iter().map(Vec::as_slice))?;

    Ok(ArtistSummary {
        av_time_btwn_release,
        total_albums: discography.albums.len(),
        track_per_album,
        image_url: image_url.to_string(),
        features,
        classic,
    })
}

/// Build the summary for one artist.
///
/// Any failure aborts this artist; no partial summary is produced.
pub async fn aggregate_artist<C>(client: &C, artist: &ArtistReference) -> Result<ArtistSummary>
where
    C: SpotifyClient + ?Sized,
{
    log::info!("Aggregating '{}'", artist.name);

    let image_url = fetch_artist_image(client, artist.id()).await?;
    let discography = gather_discography(client, artist.id()).await?;
    let summary = summarize(&discography, &image_url, artist.classic)?;

    log::debug!(
        "'{}': {} albums, {:.1} tracks/album, {:.1} days between releases",
        artist.name,
        summary.total_albums,
        summary.track_per_album,
        summary.av_time_btwn_release
    );
    Ok(summary)
}

/// Aggregate every artist in turn into a dataset keyed by artist name.
///
/// Artists are processed one after another. With [`FailurePolicy::Abort`] the
/// first failure is returned and nothing is kept; with [`FailurePolicy::Skip`]
/// failed artists are logged and left out.
pub async fn load_artist_data<C>(
    client: &C,
    artists: &[ArtistReference],
    policy: FailurePolicy,
) -> Result<Dataset>
where
    C: SpotifyClient + ?Sized,
{
    let mut dataset = Dataset::new();

    for artist in artists {
        match aggregate_artist(client, artist).await {
            Ok(summary) => dataset.insert(artist.name.to_string(), summary),
            Err(e) if policy == FailurePolicy::Skip => {
                log::warn!("Skipping '{}': {e}", artist.name);
            }
            Err(e) => return Err(e),
        }
    }

    log::info!("Aggregated {} of {} artists", dataset.len(), artists.len());
    Ok(dataset)
}
