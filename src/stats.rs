//! Numeric reductions behind the artist summary.
//!
//! Volatility is the population standard deviation (divisor `n`). Artist-level
//! feature statistics are two-level averages: computed per album first, then
//! averaged across albums so every album weighs the same regardless of length.

use crate::types::{AudioFeature, AudioFeatures, FeatureStats};
use crate::{Result, SpotifyError};
use chrono::NaiveDate;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Mean gap in days between consecutive releases.
///
/// Dates are sorted newest first and successive differences taken, so every
/// gap is non-negative. Fewer than two dates leave no gap to average and fail
/// with [`SpotifyError::InsufficientData`].
pub fn average_release_gap_days(dates: &[NaiveDate]) -> Result<f64> {
    if dates.len() < 2 {
        return Err(SpotifyError::InsufficientData(format!(
            "release gap needs at least two albums, got {}",
            dates.len()
        )));
    }

    let mut sorted = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).num_days() as f64)
        .collect();

    // Non-empty: at least one window exists for two or more dates.
    Ok(gaps.iter().sum::<f64>() / gaps.len() as f64)
}

/// Mean and volatility of every audio feature across one album's tracks.
///
/// Returns `None` for an album without tracks.
pub fn album_feature_stats(
    tracks: &[AudioFeatures],
) -> Option<[FeatureStats; AudioFeature::COUNT]> {
    if tracks.is_empty() {
        return None;
    }

    Some(AudioFeature::ALL.map(|feature| {
        let values: Vec<f64> = tracks.iter().map(|t| t.get(feature)).collect();
        FeatureStats {
            mean: mean(&values).unwrap_or_default(),
            volatility: std_dev(&values).unwrap_or_default(),
        }
    }))
}

/// Two-level feature statistics: per-album mean and volatility, averaged over albums.
///
/// Albums without tracks are left out. Fails with
/// [`SpotifyError::InsufficientData`] when no album has any tracks.
pub fn artist_feature_stats<'a, I>(albums: I) -> Result<[FeatureStats; AudioFeature::COUNT]>
where
    I: IntoIterator<Item = &'a [AudioFeatures]>,
{
    let per_album: Vec<_> = albums
        .into_iter()
        .filter_map(album_feature_stats)
        .collect();

    if per_album.is_empty() {
        return Err(SpotifyError::InsufficientData(
            "no album has tracks with audio features".to_string(),
        ));
    }

    let count = per_album.len() as f64;
    let mut totals = [FeatureStats::default(); AudioFeature::COUNT];
    for album in &per_album {
        for (total, stats) in totals.iter_mut().zip(album) {
            total.mean += stats.mean;
            total.volatility += stats.volatility;
        }
    }

    Ok(totals.map(|total| FeatureStats {
        mean: total.mean / count,
        volatility: total.volatility / count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn features(danceability: f64, tempo: f64) -> AudioFeatures {
        AudioFeatures {
            danceability,
            energy: 0.5,
            key: 5.0,
            loudness: -7.0,
            mode: 1.0,
            speechiness: 0.2,
            acousticness: 0.1,
            instrumentalness: 0.0,
            liveness: 0.15,
            valence: 0.6,
            tempo,
        }
    }

    #[test]
    fn mean_and_population_std_dev() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(std_dev(&[5.0]), Some(0.0));
        // Population variance of 2,4,4,4,5,5,7,9 is 4.
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < EPSILON);
    }

    #[test]
    fn release_gap_across_leap_year() {
        let gap = average_release_gap_days(&[date(2020, 1, 1), date(2021, 1, 1)]).unwrap();
        assert_eq!(gap, 366.0);
    }

    #[test]
    fn release_gap_is_order_independent_and_non_negative() {
        let dates = [date(2010, 6, 1), date(2000, 1, 1), date(2005, 3, 15)];
        let forward = average_release_gap_days(&dates).unwrap();
        let mut reversed = dates;
        reversed.reverse();
        assert_eq!(forward, average_release_gap_days(&reversed).unwrap());

        let expected = (date(2010, 6, 1) - date(2000, 1, 1)).num_days() as f64 / 2.0;
        assert!((forward - expected).abs() < EPSILON);
        assert!(forward >= 0.0);
    }

    #[test]
    fn release_gap_needs_two_dates() {
        assert!(matches!(
            average_release_gap_days(&[date(2020, 1, 1)]),
            Err(SpotifyError::InsufficientData(_))
        ));
        assert!(average_release_gap_days(&[]).is_err());
    }

    #[test]
    fn two_level_average_weights_albums_equally() {
        let short = vec![features(1.0, 100.0)];
        let long = vec![
            features(0.0, 80.0),
            features(0.0, 80.0),
            features(0.0, 80.0),
        ];

        let stats = artist_feature_stats([short.as_slice(), long.as_slice()]).unwrap();
        let dance = stats[AudioFeature::Danceability.index()];
        // A flat mean over four tracks would give 0.25.
        assert!((dance.mean - 0.5).abs() < EPSILON);
        assert!(dance.volatility.abs() < EPSILON);
        assert!((stats[AudioFeature::Tempo.index()].mean - 90.0).abs() < EPSILON);
    }

    #[test]
    fn volatility_is_mean_of_album_deviations() {
        let a = vec![features(0.2, 90.0), features(0.4, 90.0)];
        let b = vec![features(0.5, 90.0), features(0.9, 90.0)];

        let stats = artist_feature_stats([a.as_slice(), b.as_slice()]).unwrap();
        let dance = stats[AudioFeature::Danceability.index()];
        // Album deviations are 0.1 and 0.2.
        assert!((dance.volatility - 0.15).abs() < EPSILON);
    }

    #[test]
    fn album_order_does_not_matter() {
        let a = vec![features(0.2, 95.0), features(0.7, 120.0)];
        let b = vec![features(0.9, 70.0)];
        let c = vec![features(0.1, 88.0), features(0.3, 91.0), features(0.8, 140.0)];

        let forward = artist_feature_stats([a.as_slice(), b.as_slice(), c.as_slice()]).unwrap();
        let shuffled = artist_feature_stats([c.as_slice(), a.as_slice(), b.as_slice()]).unwrap();

        for (x, y) in forward.iter().zip(shuffled.iter()) {
            assert!((x.mean - y.mean).abs() < EPSILON);
            assert!((x.volatility - y.volatility).abs() < EPSILON);
        }
    }

    #[test]
    fn empty_albums_are_skipped() {
        let empty: Vec<AudioFeatures> = vec![];
        let one = vec![features(0.6, 100.0)];

        let stats = artist_feature_stats([empty.as_slice(), one.as_slice()]).unwrap();
        assert!((stats[0].mean - 0.6).abs() < EPSILON);

        assert!(matches!(
            artist_feature_stats([empty.as_slice()]),
            Err(SpotifyError::InsufficientData(_))
        ));
    }
}
