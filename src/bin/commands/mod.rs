pub mod dataset;
pub mod graph;
pub mod show;
pub mod utils;

use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_DATASET_PATH: &str = "Data/artist_static_data.csv";
pub const DEFAULT_GRAPH_PATH: &str = "Data/JSON/artist_map.json";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphLayout {
    /// Nodes on a circle, edges named by artist
    Circle,
    /// Numbered nodes, links by index
    Indexed,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the curated artists into the static dataset
    ///
    /// Every artist is processed in turn: image lookup, full album and track
    /// listings, audio features, then the per-artist summary. Rows are printed;
    /// the CSV is only written with --write.
    ///
    /// Usage examples:
    /// # Preview the whole dataset
    /// artist-stats dataset
    ///
    /// # Rebuild the CSV, leaving out artists that fail
    /// artist-stats dataset --write --skip-failed
    ///
    /// # Only two artists, to a custom file
    /// artist-stats dataset --artist Nas --artist SZA --write --output /tmp/two.csv
    Dataset {
        /// Write the CSV file
        #[arg(long)]
        write: bool,

        /// Output path for the CSV file
        #[arg(long, default_value = DEFAULT_DATASET_PATH)]
        output: PathBuf,

        /// Log and leave out failing artists instead of aborting the run
        #[arg(long)]
        skip_failed: bool,

        /// Restrict the run to these curated artists (repeatable)
        #[arg(long = "artist", value_name = "NAME")]
        artists: Vec<String>,
    },

    /// Emit the artist network graph as JSON
    ///
    /// Usage examples:
    /// # Circle layout from a related-artists mapping
    /// artist-stats graph --links Data/JSON/related.json
    ///
    /// # Indexed layout for force-directed charts
    /// artist-stats graph --links Data/JSON/related.json --layout indexed
    Graph {
        /// JSON object mapping each artist to a list of related artists
        #[arg(long)]
        links: PathBuf,

        /// Output path for the JSON file
        #[arg(long, default_value = DEFAULT_GRAPH_PATH)]
        output: PathBuf,

        /// Layout of the emitted graph
        #[arg(long, value_enum, default_value_t = GraphLayout::Circle)]
        layout: GraphLayout,
    },

    /// Aggregate one curated artist and print its summary
    Artist {
        /// Artist name
        name: String,
    },

    /// Chart one audio feature across the tracks of an album
    ///
    /// Usage examples:
    /// artist-stats album Nas Illmatic energy
    Album {
        /// Artist name
        artist: String,

        /// Album name
        album: String,

        /// Audio feature, e.g. danceability or tempo
        feature: String,
    },
}

pub async fn execute_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Dataset {
            write,
            output,
            skip_failed,
            artists,
        } => {
            let client = utils::create_client()?;
            let output = write.then_some(output.as_path());
            dataset::handle_dataset(&client, &artists, skip_failed, output).await
        }

        Commands::Graph {
            links,
            output,
            layout,
        } => graph::handle_graph(&links, &output, layout),

        Commands::Artist { name } => {
            let client = utils::create_client()?;
            show::handle_show_artist(&client, &name).await
        }

        Commands::Album {
            artist,
            album,
            feature,
        } => {
            let feature = feature.parse()?;
            let client = utils::create_client()?;
            show::handle_show_album(&client, &artist, &album, feature).await
        }
    }
}
