//! The artist-level CSV dataset.
//!
//! Column layout: `artist, av_time_btwn_release, total_albums, track_per_album,
//! image_url`, then `<feature> mean` and `<feature> vol` for every audio feature
//! in canonical order, then `classic`. The artist name is an ordinary leading
//! column; no index column is written.

use crate::types::{ArtistSummary, AudioFeature, FeatureStats};
use crate::{Result, SpotifyError};
use std::fs::{self, File};
use std::io;
use std::path::Path;

const FIXED_COLUMNS: [&str; 5] = [
    "artist",
    "av_time_btwn_release",
    "total_albums",
    "track_per_album",
    "image_url",
];
const CLASSIC_COLUMN: &str = "classic";

/// Artist summaries keyed by artist name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<(String, ArtistSummary)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. An existing row with the same name is replaced in place.
    pub fn insert(&mut self, artist: String, summary: ArtistSummary) {
        match self.rows.iter_mut().find(|(name, _)| *name == artist) {
            Some(row) => row.1 = summary,
            None => self.rows.push((artist, summary)),
        }
    }

    pub fn get(&self, artist: &str) -> Option<&ArtistSummary> {
        self.rows
            .iter()
            .find(|(name, _)| name == artist)
            .map(|(_, summary)| summary)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArtistSummary)> {
        self.rows
            .iter()
            .map(|(name, summary)| (name.as_str(), summary))
    }

    /// Column names in file order.
    pub fn header() -> Vec<String> {
        let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        for feature in AudioFeature::ALL {
            header.push(mean_column(feature));
            header.push(vol_column(feature));
        }
        header.push(CLASSIC_COLUMN.to_string());
        header
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(Self::header())?;

        for (artist, summary) in &self.rows {
            let mut record = vec![
                artist.clone(),
                summary.av_time_btwn_release.to_string(),
                summary.total_albums.to_string(),
                summary.track_per_album.to_string(),
                summary.image_url.clone(),
            ];
            for stats in &summary.features {
                record.push(stats.mean.to_string());
                record.push(stats.volatility.to_string());
            }
            record.push(if summary.classic { "True" } else { "False" }.to_string());
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }

    /// Write the dataset to `path`, creating parent directories as needed.
    ///
    /// Rows are serialized in full before the file is touched, so a failed
    /// serialization leaves any existing file as it was.
    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, buffer)?;
        log::info!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a dataset written by [`Dataset::write_csv`]. Columns are located by name.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv = csv::Reader::from_reader(reader);
        let columns = ColumnIndex::new(csv.headers()?)?;

        let mut dataset = Dataset::new();
        for record in csv.records() {
            let record = record?;
            let (artist, summary) = columns.parse_row(&record)?;
            dataset.insert(artist, summary);
        }
        Ok(dataset)
    }

    pub fn read_csv_file(path: &Path) -> Result<Self> {
        Self::read_csv(File::open(path)?)
    }
}

fn mean_column(feature: AudioFeature) -> String {
    format!("{} mean", feature.name())
}

fn vol_column(feature: AudioFeature) -> String {
    format!("{} vol", feature.name())
}

/// Positions of every expected column within a CSV header.
struct ColumnIndex {
    fixed: [usize; FIXED_COLUMNS.len()],
    features: Vec<(usize, usize)>,
    classic: usize,
}

impl ColumnIndex {
    fn new(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SpotifyError::Parse(format!("missing CSV column '{name}'")))
        };

        let mut fixed = [0; FIXED_COLUMNS.len()];
        for (slot, name) in fixed.iter_mut().zip(FIXED_COLUMNS) {
            *slot = find(name)?;
        }

        let features = AudioFeature::ALL
            .iter()
            .map(|&feature| -> Result<(usize, usize)> {
                Ok((find(&mean_column(feature))?, find(&vol_column(feature))?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fixed,
            features,
            classic: find(CLASSIC_COLUMN)?,
        })
    }

    fn parse_row(&self, record: &csv::StringRecord) -> Result<(String, ArtistSummary)> {
        let field = |index: usize| {
            record
                .get(index)
                .ok_or_else(|| SpotifyError::Parse(format!("short CSV row: {record:?}")))
        };
        let number = |index: usize| -> Result<f64> {
            let raw = field(index)?;
            raw.trim()
                .parse::<f64>()
                .map_err(|e| SpotifyError::Parse(format!("invalid number '{raw}': {e}")))
        };

        let artist = field(self.fixed[0])?.to_string();
        let total_albums = field(self.fixed[2])?;
        let total_albums = total_albums.trim().parse::<usize>().map_err(|e| {
            SpotifyError::Parse(format!("invalid album count '{total_albums}': {e}"))
        })?;

        let mut features = [FeatureStats::default(); AudioFeature::COUNT];
        for (stats, &(mean_at, vol_at)) in features.iter_mut().zip(&self.features) {
            stats.mean = number(mean_at)?;
            stats.volatility = number(vol_at)?;
        }

        let classic = field(self.classic)?;
        let classic = match classic.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(SpotifyError::Parse(format!(
                    "invalid classic flag '{other}'"
                )))
            }
        };

        Ok((
            artist,
            ArtistSummary {
                av_time_btwn_release: number(self.fixed[1])?,
                total_albums,
                track_per_album: number(self.fixed[3])?,
                image_url: field(self.fixed[4])?.to_string(),
                features,
                classic,
            },
        ))
    }
}
