use super::utils::{bar, resolve_artist, truncate};
use artist_stats::aggregate::index_albums_by_name;
use artist_stats::{
    aggregate_artist, fetch_albums, fetch_audio_features, fetch_tracks, AudioFeature,
    SpotifyClientImpl, SpotifyError,
};

const BAR_WIDTH: usize = 40;

/// Aggregate one artist and print every field of its summary.
pub async fn handle_show_artist(
    client: &SpotifyClientImpl,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let artist = resolve_artist(client, name).await?;
    println!("🎤 {} ({})", artist.name, artist.uri);

    let summary = aggregate_artist(client, &artist).await?;

    println!("  Era: {}", if summary.classic { "classic" } else { "contemporary" });
    println!("  Image: {}", summary.image_url);
    println!("  Albums: {}", summary.total_albums);
    println!("  Tracks per album: {:.2}", summary.track_per_album);
    println!(
        "  Days between releases: {:.1}",
        summary.av_time_btwn_release
    );
    println!();
    println!("  {:<18} {:>10} {:>10}", "feature", "mean", "vol");
    for feature in AudioFeature::ALL {
        let stats = summary.feature(feature);
        println!(
            "  {:<18} {:>10.4} {:>10.4}",
            feature.name(),
            stats.mean,
            stats.volatility
        );
    }

    Ok(())
}

/// Chart one audio feature across every track of one album.
pub async fn handle_show_album(
    client: &SpotifyClientImpl,
    artist_name: &str,
    album_name: &str,
    feature: AudioFeature,
) -> Result<(), Box<dyn std::error::Error>> {
    let artist = resolve_artist(client, artist_name).await?;
    let albums = index_albums_by_name(fetch_albums(client, artist.id()).await?);

    let album = albums
        .into_iter()
        .find(|a| a.name.eq_ignore_ascii_case(album_name))
        .ok_or_else(|| {
            SpotifyError::NotFound(format!("no album '{album_name}' by {}", artist.name))
        })?;

    let tracks = fetch_tracks(client, &album.id).await?;
    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let features = fetch_audio_features(client, &ids).await?;

    println!("💿 {} - {album}", artist.name);
    println!("   {feature}\n");

    let values: Vec<f64> = features.iter().map(|f| f.get(feature)).collect();
    let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    for (track, value) in tracks.iter().zip(&values) {
        println!(
            "  {:<32} {:>9.3} {}",
            truncate(&track.name, 32),
            value,
            bar(*value, max_abs, BAR_WIDTH)
        );
    }

    Ok(())
}
