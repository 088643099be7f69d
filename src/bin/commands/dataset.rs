use super::utils::{select_curated, truncate};
use artist_stats::{load_artist_data, AudioFeature, Dataset, FailurePolicy, SpotifyClientImpl};
use std::path::Path;

/// Aggregate the selected curated artists, print the rows and optionally write the CSV.
pub async fn handle_dataset(
    client: &SpotifyClientImpl,
    names: &[String],
    skip_failed: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let artists = select_curated(names)?;
    let policy = if skip_failed {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };

    println!("📊 Aggregating {} artists...", artists.len());
    let dataset = load_artist_data(client, &artists, policy).await?;

    print_rows(&dataset);

    match output {
        Some(path) => {
            dataset.write_csv_file(path)?;
            println!("\n💾 Wrote {} rows to {}", dataset.len(), path.display());
        }
        None => println!("\n💡 Dry run, pass --write to save the CSV"),
    }

    if dataset.len() < artists.len() {
        println!(
            "⚠️  {} of {} artists were skipped",
            artists.len() - dataset.len(),
            artists.len()
        );
    }

    Ok(())
}

fn print_rows(dataset: &Dataset) {
    println!(
        "\n{:<24} {:>8} {:>7} {:>8} {:>8} {:>8}  era",
        "artist", "gap (d)", "albums", "tracks", "dance", "energy"
    );
    for (artist, summary) in dataset.iter() {
        println!(
            "{:<24} {:>8.1} {:>7} {:>8.1} {:>8.3} {:>8.3}  {}",
            truncate(artist, 24),
            summary.av_time_btwn_release,
            summary.total_albums,
            summary.track_per_album,
            summary.feature(AudioFeature::Danceability).mean,
            summary.feature(AudioFeature::Energy).mean,
            if summary.classic { "classic" } else { "modern" }
        );
    }
}
