use thiserror::Error;

/// Error types for Spotify dataset operations.
///
/// This enum covers everything that can go wrong while talking to the Spotify Web API,
/// reducing the fetched data to statistics, and reading or writing dataset files.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use artist_stats::{aggregate_artist, Credentials, SpotifyClientImpl, SpotifyError, CURATED_ARTISTS};
///
/// #[tokio::main]
/// async fn main() {
///     let credentials = Credentials::new("id", "secret");
///     let client = SpotifyClientImpl::new(
///         Box::new(http_client::native::NativeClient::new()),
///         credentials,
///     );
///
///     match aggregate_artist(&client, &CURATED_ARTISTS[0]).await {
///         Ok(summary) => println!("{} albums", summary.total_albums),
///         Err(SpotifyError::RateLimit { retry_after }) => {
///             eprintln!("Rate limited, retry in {} seconds", retry_after);
///         }
///         Err(SpotifyError::InsufficientData(msg)) => eprintln!("Not enough data: {}", msg),
///         Err(e) if e.is_upstream() => eprintln!("Service error: {}", e),
///         Err(e) => eprintln!("Other error: {}", e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, DNS errors and any non-success status
    /// the service answers with that has no more specific variant.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Rate limiting from the Web API (HTTP 429).
    ///
    /// The `retry_after` field carries the `Retry-After` header. Nothing in this
    /// crate waits on it; the error is passed straight to the caller.
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimit {
        /// Number of seconds to wait before retrying
        retry_after: u64,
    },

    /// Client credentials or bearer token rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A lookup or search came back empty.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A statistic is undefined for the data at hand.
    ///
    /// # Common Causes
    /// - Artist with a single album (no release gap exists)
    /// - Artist whose albums have no tracks at all
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The number of tracks listed for an album differs from the album's
    /// advertised track count, meaning pagination stopped early.
    #[error("Partial fetch for album '{album}': expected {expected} tracks, fetched {fetched}")]
    PartialFetch {
        album: String,
        expected: u32,
        fetched: usize,
    },

    /// Failed to parse a service response or an input file.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Credentials missing or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpotifyError {
    /// Whether the error originated from the remote service (transport, status or rate limit).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SpotifyError::Upstream(_) | SpotifyError::RateLimit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_class_includes_rate_limit() {
        assert!(SpotifyError::Upstream("boom".to_string()).is_upstream());
        assert!(SpotifyError::RateLimit { retry_after: 3 }.is_upstream());
        assert!(!SpotifyError::NotFound("x".to_string()).is_upstream());
        assert!(!SpotifyError::InsufficientData("x".to_string()).is_upstream());
    }

    #[test]
    fn partial_fetch_message() {
        let err = SpotifyError::PartialFetch {
            album: "Illmatic".to_string(),
            expected: 10,
            fetched: 7,
        };
        assert_eq!(
            err.to_string(),
            "Partial fetch for album 'Illmatic': expected 10 tracks, fetched 7"
        );
    }
}
