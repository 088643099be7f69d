//! The hand-curated artist table the dataset is built from.

use serde::Serialize;
use std::borrow::Cow;

/// An artist to aggregate: display name, Spotify URI and era flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistReference {
    pub name: Cow<'static, str>,
    pub uri: Cow<'static, str>,
    pub classic: bool,
}

impl ArtistReference {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, classic: bool) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            uri: Cow::Owned(uri.into()),
            classic,
        }
    }

    const fn curated(name: &'static str, uri: &'static str, classic: bool) -> Self {
        Self {
            name: Cow::Borrowed(name),
            uri: Cow::Borrowed(uri),
            classic,
        }
    }

    /// The bare artist id, with any `spotify:artist:` prefix removed.
    pub fn id(&self) -> &str {
        spotify_id(&self.uri)
    }
}

/// Strip a `spotify:<kind>:` URI down to its id. Bare ids pass through unchanged.
pub fn spotify_id(uri: &str) -> &str {
    match uri.strip_prefix("spotify:") {
        Some(rest) => rest.split_once(':').map_or(rest, |(_, id)| id),
        None => uri,
    }
}

/// Contemporary artists first, then classic ones; dataset rows follow this order.
pub const CURATED_ARTISTS: &[ArtistReference] = &[
    ArtistReference::curated("JID", "spotify:artist:6U3ybJ9UHNKEdsH7ktGBZ7", false),
    ArtistReference::curated("Logic", "spotify:artist:4xRYI6VqpkE3UwrDrAZL8L", false),
    ArtistReference::curated("BROCKHAMPTON", "spotify:artist:1Bl6wpkWCQ4KVgnASpvzzA", false),
    ArtistReference::curated("Smino", "spotify:artist:1ybINI1qPiFbwDXamRtwxD", false),
    ArtistReference::curated("SZA", "spotify:artist:7tYKF4w9nC0nq9CsPZTHyP", false),
    ArtistReference::curated("Travis Scott", "spotify:artist:0Y5tJX1MQlPlqiwlOH1tJY", false),
    ArtistReference::curated("MF DOOM", "spotify:artist:2pAWfrd7WFF3XhVt9GooDL", true),
    ArtistReference::curated("Nas", "spotify:artist:20qISvAhX20dpIbOOzGK3q", true),
    ArtistReference::curated("Kendrick Lamar", "spotify:artist:2YZyLoL8N0Wb9xBt1NhZWg", true),
    ArtistReference::curated("J. Cole", "spotify:artist:6l3HvQ5sa6mXTsMTB19rO5", true),
    ArtistReference::curated("Mos Def", "spotify:artist:0Mz5XE0kb1GBnbLQm2VbcO", true),
    ArtistReference::curated("The Notorious B.I.G.", "spotify:artist:5me0Irg2ANcsgc93uaYrpb", true),
    ArtistReference::curated("Tupac", "spotify:artist:1ZwdS5xdxEREPySFridCfh", true),
    ArtistReference::curated("Dr. Dre", "spotify:artist:6DPYiyq5kWVQS4RGwxzPC7", true),
    ArtistReference::curated("Snoop Dog", "spotify:artist:7hJcb9fa4alzcOq3EaNPoG", true),
    ArtistReference::curated("Mobb Deep", "spotify:artist:6O2zJ0tId7g07yzHtX0yap", true),
    ArtistReference::curated("Kanye West", "spotify:artist:5K4W6rqBFWDnAN6FQUkS6x", true),
    ArtistReference::curated("Jay-Z", "spotify:artist:3nFkdlSjzX9mRTtwJOzDYB", true),
    ArtistReference::curated("De La Soul", "spotify:artist:1Z8ODXyhEBi3WynYw0Rya6", true),
    ArtistReference::curated("Wu-Tang Clan", "spotify:artist:34EP7KEpOjXcM2TCat1ISk", true),
    ArtistReference::curated("Lauryn Hill", "spotify:artist:2Mu5NfyYm8n5iTomuKAEHl", true),
    ArtistReference::curated("Outkast", "spotify:artist:1G9G7WwrXka3Z1r7aIDjI7", true),
    ArtistReference::curated("A Tribe Called Quest", "spotify:artist:09hVIj6vWgoCDtT03h8ZCa", true),
    ArtistReference::curated("Naughty by Nature", "spotify:artist:4Otx4bRLSfpah5kX8hdgDC", true),
    ArtistReference::curated("Cypress Hill", "spotify:artist:4P0dddbxPil35MNN9G2MEX", true),
    ArtistReference::curated("Common", "spotify:artist:2GHclqNVjqGuiE5mA7BEoc", true),
];

/// Look up a curated artist by display name, ignoring case.
pub fn find_curated(name: &str) -> Option<&'static ArtistReference> {
    CURATED_ARTISTS
        .iter()
        .find(|artist| artist.name.eq_ignore_ascii_case(name))
}
