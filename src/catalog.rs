//! Adapter operations over [`SpotifyClient`]: image lookup, fully paginated
//! album and track listings, and order-preserving audio feature lookup.

use crate::client::MAX_AUDIO_FEATURE_IDS;
use crate::iterator::{AlbumTracksIterator, ArtistAlbumsIterator, AsyncPaginatedIterator};
use crate::r#trait::SpotifyClient;
use crate::{Album, AudioFeatures, Result, SpotifyError, Track};

/// Resolve the URL of an artist's smallest image.
///
/// The artist's display name is looked up by id and then searched for with an
/// `artist:` filter; the first search hit supplies the image. Fails with
/// [`SpotifyError::NotFound`] when the search has no hits or the hit has no images.
pub async fn fetch_artist_image<C>(client: &C, artist_id: &str) -> Result<String>
where
    C: SpotifyClient + ?Sized,
{
    let artist = client.get_artist(artist_id).await?;
    let query = format!("artist:{}", artist.name);
    let results = client.search_artists(&query).await?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| SpotifyError::NotFound(format!("no search results for '{query}'")))?;

    first
        .smallest_image()
        .map(|image| image.url.clone())
        .ok_or_else(|| SpotifyError::NotFound(format!("no images for artist '{}'", first.name)))
}

/// All of an artist's albums, in the order the service returns them.
pub async fn fetch_albums<C>(client: &C, artist_id: &str) -> Result<Vec<Album>>
where
    C: SpotifyClient + ?Sized,
{
    let mut albums = ArtistAlbumsIterator::new(client, artist_id);
    let collected = albums.collect_all().await?;
    log::debug!(
        "Fetched {} albums for artist {artist_id} in {} pages",
        collected.len(),
        albums.pages_fetched()
    );
    Ok(collected)
}

/// All tracks of one album, without audio features, in service order.
pub async fn fetch_tracks<C>(client: &C, album_id: &str) -> Result<Vec<Track>>
where
    C: SpotifyClient + ?Sized,
{
    AlbumTracksIterator::new(client, album_id)
        .collect_all()
        .await
}

/// Audio features for `track_ids`, positionally aligned with the input.
///
/// Albums up to [`MAX_AUDIO_FEATURE_IDS`] tracks take a single request; longer
/// inputs are split at that limit and the results concatenated in order. A track
/// the service has no analysis for fails with [`SpotifyError::NotFound`].
pub async fn fetch_audio_features<C>(
    client: &C,
    track_ids: &[String],
) -> Result<Vec<AudioFeatures>>
where
    C: SpotifyClient + ?Sized,
{
    let mut features = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(MAX_AUDIO_FEATURE_IDS) {
        let batch = client.get_audio_features(chunk).await?;
        if batch.len() != chunk.len() {
            return Err(SpotifyError::Parse(format!(
                "requested audio features for {} tracks, received {}",
                chunk.len(),
                batch.len()
            )));
        }

        for (id, entry) in chunk.iter().zip(batch) {
            let entry = entry
                .ok_or_else(|| SpotifyError::NotFound(format!("audio features for track {id}")))?;
            features.push(entry);
        }
    }

    Ok(features)
}
