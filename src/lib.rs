pub mod aggregate;
pub mod api;
pub mod artists;
pub mod catalog;
pub mod client;
pub mod credentials;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod headers;
pub mod iterator;
pub mod stats;
#[cfg(test)]
mod testing;
pub mod token;
pub mod r#trait;
pub mod types;

pub use aggregate::{
    aggregate_artist, gather_discography, load_artist_data, summarize, AlbumTracks, Discography,
    FailurePolicy,
};
pub use artists::{find_curated, ArtistReference, CURATED_ARTISTS};
pub use catalog::{fetch_albums, fetch_artist_image, fetch_audio_features, fetch_tracks};
pub use client::SpotifyClientImpl;
pub use credentials::Credentials;
pub use dataset::Dataset;
pub use error::SpotifyError;
pub use graph::{ArtistLinks, Graph, IndexedGraph};
pub use iterator::{AlbumTracksIterator, ArtistAlbumsIterator, AsyncPaginatedIterator};
pub use r#trait::SpotifyClient;
pub use types::{
    Album, AlbumPage, Artist, ArtistSummary, AudioFeature, AudioFeatures, FeatureStats, Image,
    Track, TrackPage,
};

#[cfg(feature = "mock")]
pub use r#trait::MockSpotifyClient;

pub type Result<T> = std::result::Result<T, SpotifyError>;
