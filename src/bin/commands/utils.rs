use artist_stats::{
    find_curated, ArtistReference, Credentials, SpotifyClient, SpotifyClientImpl, SpotifyError,
    CURATED_ARTISTS,
};

/// Build a client from the credentials in the environment or the config file.
pub fn create_client() -> Result<SpotifyClientImpl, Box<dyn std::error::Error>> {
    let credentials = match Credentials::load() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  SPOTIFY_CLIENT_ID=your_client_id");
            eprintln!("  SPOTIFY_CLIENT_SECRET=your_client_secret");
            eprintln!();
            eprintln!(
                "or store them as {{\"client_id\": ..., \"client_secret\": ...}} in {}",
                Credentials::credentials_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config directory".to_string())
            );
            return Err(e.into());
        }
    };
    log::debug!("Using client id {}", credentials.client_id);

    let http_client = http_client::native::NativeClient::new();
    Ok(SpotifyClientImpl::new(Box::new(http_client), credentials))
}

/// The curated artists matching `names`, or the whole table when `names` is empty.
pub fn select_curated(names: &[String]) -> Result<Vec<ArtistReference>, SpotifyError> {
    if names.is_empty() {
        return Ok(CURATED_ARTISTS.to_vec());
    }
    names
        .iter()
        .map(|name| {
            find_curated(name)
                .cloned()
                .ok_or_else(|| SpotifyError::NotFound(format!("'{name}' is not a curated artist")))
        })
        .collect()
}

/// Resolve an artist by name: the curated table first, then a service search.
pub async fn resolve_artist<C: SpotifyClient>(
    client: &C,
    name: &str,
) -> Result<ArtistReference, SpotifyError> {
    if let Some(artist) = find_curated(name) {
        return Ok(artist.clone());
    }

    log::debug!("'{name}' is not curated, searching the catalog");
    let query = format!("artist:{name}");
    let hit = client
        .search_artists(&query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| SpotifyError::NotFound(format!("no search results for '{query}'")))?;
    Ok(ArtistReference::new(hit.name, hit.id, false))
}

/// Render `value` as a horizontal bar scaled against `max_abs`.
pub fn bar(value: f64, max_abs: f64, width: usize) -> String {
    if max_abs <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let len = ((value.abs() / max_abs) * width as f64).round() as usize;
    let glyph = if value < 0.0 { "░" } else { "█" };
    glyph.repeat(len.min(width))
}

/// Truncate `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(1.0, 1.0, 10).chars().count(), 10);
        assert_eq!(bar(0.5, 1.0, 10).chars().count(), 5);
        assert_eq!(bar(-6.0, 12.0, 10), "░".repeat(5));
        assert!(bar(0.3, 0.0, 10).is_empty());
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Illmatic", 20), "Illmatic");
        assert_eq!(truncate("The World Is Yours", 8), "The Wor…");
    }

    #[test]
    fn select_curated_by_name() {
        let all = select_curated(&[]).unwrap();
        assert_eq!(all.len(), CURATED_ARTISTS.len());

        let picked = select_curated(&["nas".to_string()]).unwrap();
        assert_eq!(picked[0].name, "Nas");

        assert!(select_curated(&["Nobody".to_string()]).is_err());
    }
}
