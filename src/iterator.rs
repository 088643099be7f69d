use crate::r#trait::SpotifyClient;
use crate::{Album, Result, Track};

use async_trait::async_trait;

/// Async iterator trait for paginated Spotify listings.
///
/// Pages are fetched lazily, one request at a time, by following the `next`
/// cursor each page carries until the service stops returning one.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or parsing error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec, in service order.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn pages_fetched(&self) -> u32;

    /// Total number of items the service reported, once the first page is in.
    fn total_items(&self) -> Option<u32> {
        None
    }
}

/// Where a cursor-following iterator stands between pages.
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

impl Cursor {
    fn from_next(next: Option<String>) -> Self {
        match next {
            Some(url) => Cursor::Next(url),
            None => Cursor::Exhausted,
        }
    }
}

/// Iterator over an artist's albums (album group only).
pub struct ArtistAlbumsIterator<'a, C: SpotifyClient + ?Sized> {
    client: &'a C,
    artist_id: String,
    cursor: Cursor,
    buffer: Vec<Album>,
    pages_fetched: u32,
    total: Option<u32>,
}

#[async_trait(?Send)]
impl<'a, C: SpotifyClient + ?Sized> AsyncPaginatedIterator<Album>
    for ArtistAlbumsIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<Album>> {
        // A page may legitimately be empty, so keep going until something arrives.
        while self.buffer.is_empty() {
            let cursor = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Start => None,
                Cursor::Next(url) => Some(url),
                Cursor::Exhausted => return Ok(None),
            };

            log::debug!(
                "Fetching album page {} for artist {}",
                self.pages_fetched + 1,
                self.artist_id
            );
            let page = self
                .client
                .get_artist_albums_page(&self.artist_id, cursor)
                .await?;

            self.pages_fetched += 1;
            self.total = page.total;
            self.cursor = Cursor::from_next(page.next);
            self.buffer = page.albums;
            self.buffer.reverse(); // Reverse so we can pop from end efficiently
        }

        Ok(self.buffer.pop())
    }

    fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    fn total_items(&self) -> Option<u32> {
        self.total
    }
}

impl<'a, C: SpotifyClient + ?Sized> ArtistAlbumsIterator<'a, C> {
    pub fn new(client: &'a C, artist_id: impl Into<String>) -> Self {
        Self {
            client,
            artist_id: artist_id.into(),
            cursor: Cursor::Start,
            buffer: Vec::new(),
            pages_fetched: 0,
            total: None,
        }
    }
}

/// Iterator over the tracks of one album, without audio features.
pub struct AlbumTracksIterator<'a, C: SpotifyClient + ?Sized> {
    client: &'a C,
    album_id: String,
    cursor: Cursor,
    buffer: Vec<Track>,
    pages_fetched: u32,
    total: Option<u32>,
}

#[async_trait(?Send)]
impl<'a, C: SpotifyClient + ?Sized> AsyncPaginatedIterator<Track>
    for AlbumTracksIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<Track>> {
        while self.buffer.is_empty() {
            let cursor = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Start => None,
                Cursor::Next(url) => Some(url),
                Cursor::Exhausted => return Ok(None),
            };

            log::debug!(
                "Fetching track page {} for album {}",
                self.pages_fetched + 1,
                self.album_id
            );
            let page = self
                .client
                .get_album_tracks_page(&self.album_id, cursor)
                .await?;

            self.pages_fetched += 1;
            self.total = page.total;
            self.cursor = Cursor::from_next(page.next);
            self.buffer = page.tracks;
            self.buffer.reverse();
        }

        Ok(self.buffer.pop())
    }

    fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    fn total_items(&self) -> Option<u32> {
        self.total
    }
}

impl<'a, C: SpotifyClient + ?Sized> AlbumTracksIterator<'a, C> {
    pub fn new(client: &'a C, album_id: impl Into<String>) -> Self {
        Self {
            client,
            album_id: album_id.into(),
            cursor: Cursor::Start,
            buffer: Vec::new(),
            pages_fetched: 0,
            total: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#trait::MockSpotifyClient;
    use crate::{AlbumPage, SpotifyError, TrackPage};
    use chrono::NaiveDate;
    use mockall::predicate::*;
    use mockall::Sequence;

    fn album(name: &str) -> Album {
        Album {
            name: name.to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            total_tracks: 1,
            id: format!("{name}-id"),
            uri: format!("spotify:album:{name}-id"),
        }
    }

    fn track(name: &str) -> Track {
        Track {
            name: name.to_string(),
            duration_secs: 180.0,
            id: format!("{name}-id"),
            uri: format!("spotify:track:{name}-id"),
            features: None,
        }
    }

    #[tokio::test]
    async fn follows_album_cursor_until_exhausted() {
        let mut mock = MockSpotifyClient::new();
        let mut seq = Sequence::new();

        mock.expect_get_artist_albums_page()
            .with(eq("artist"), eq(None::<String>))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(AlbumPage {
                    albums: vec![album("first")],
                    next: Some("page-2".to_string()),
                    total: Some(3),
                })
            });
        mock.expect_get_artist_albums_page()
            .with(eq("artist"), eq(Some("page-2".to_string())))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(AlbumPage {
                    albums: vec![album("second")],
                    next: Some("page-3".to_string()),
                    total: Some(3),
                })
            });
        mock.expect_get_artist_albums_page()
            .with(eq("artist"), eq(Some("page-3".to_string())))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(AlbumPage {
                    albums: vec![album("third")],
                    next: None,
                    total: Some(3),
                })
            });

        let mut albums = ArtistAlbumsIterator::new(&mock, "artist");
        let collected = albums.collect_all().await.unwrap();

        let names: Vec<_> = collected.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(albums.pages_fetched(), 3);
        assert_eq!(albums.total_items(), Some(3));

        // Exhausted iterators do not issue further requests.
        assert!(albums.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn skips_empty_pages() {
        let mut mock = MockSpotifyClient::new();
        mock.expect_get_album_tracks_page()
            .with(eq("album"), eq(None::<String>))
            .times(1)
            .returning(|_, _| {
                Ok(TrackPage {
                    tracks: vec![],
                    next: Some("page-2".to_string()),
                    total: Some(2),
                })
            });
        mock.expect_get_album_tracks_page()
            .with(eq("album"), eq(Some("page-2".to_string())))
            .times(1)
            .returning(|_, _| {
                Ok(TrackPage {
                    tracks: vec![track("a"), track("b")],
                    next: None,
                    total: Some(2),
                })
            });

        let mut tracks = AlbumTracksIterator::new(&mock, "album");
        let first = tracks.take(1).await.unwrap();
        assert_eq!(first[0].name, "a");
        let rest = tracks.collect_all().await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "b");
    }

    #[tokio::test]
    async fn propagates_page_errors() {
        let mut mock = MockSpotifyClient::new();
        mock.expect_get_album_tracks_page()
            .times(1)
            .returning(|_, _| Err(SpotifyError::RateLimit { retry_after: 30 }));

        let mut tracks = AlbumTracksIterator::new(&mock, "album");
        let err = tracks.collect_all().await.unwrap_err();
        assert!(matches!(err, SpotifyError::RateLimit { retry_after: 30 }));
    }
}
