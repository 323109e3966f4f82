//! AIorNot CLI - detect AI-generated content in images, videos, audio, and text.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a single image
//! aiornot image photo.jpg
//!
//! # Batch a directory, streaming JSONL
//! aiornot batch image --dir ./photos --output results.jsonl
//!
//! # Check API health and token
//! aiornot token check
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// AIorNot - detect AI-generated content in images, videos, audio, and text.
#[derive(Parser, Debug)]
#[command(name = "aiornot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image file for AI-generated content
    Image(cli::analyze::ImageArgs),

    /// Analyze a video file for AI-generated content
    Video(cli::analyze::VideoArgs),

    /// Analyze a voice/speech audio file for AI-generated content
    Voice(cli::analyze::AudioArgs),

    /// Analyze a music audio file for AI-generated content
    Music(cli::analyze::AudioArgs),

    /// Analyze text for AI-generated content
    Text(cli::analyze::TextArgs),

    /// Process multiple files in batch mode
    Batch(cli::batch::BatchArgs),

    /// Manage the API token
    Token(cli::token::TokenArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    tracing::debug!("aiornot v{}", aiornot_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Image(args) => cli::analyze::image(args).await,
        Commands::Video(args) => cli::analyze::video(args).await,
        Commands::Voice(args) => cli::analyze::voice(args).await,
        Commands::Music(args) => cli::analyze::music(args).await,
        Commands::Text(args) => cli::analyze::text(args).await,
        Commands::Batch(args) => cli::batch::execute(args).await,
        Commands::Token(args) => cli::token::execute(args).await,
    }
}
