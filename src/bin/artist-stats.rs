mod commands;

use clap::Parser;
use commands::{execute_command, Commands};

/// Artist statistics from the Spotify catalog
#[derive(Parser)]
#[command(
    name = "artist-stats",
    about = "Build per-artist statistics and network graphs from the Spotify catalog",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // RUST_LOG still wins over the verbose flag
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = execute_command(args.command).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
