use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportFormat;

#[derive(Parser)]
#[command(
    name = "yt-transcript-scraper",
    about = "YouTube Transcript Scraper - bulk-fetch transcripts and export them to JSON, CSV, Excel, HTML, or XML",
    version,
    long_about = "A CLI tool that reads a list of YouTube URLs, fetches the available transcript for each video, and exports the collected records into a single output file in one of several formats."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch transcripts for a list of URLs and export them
    Scrape {
        /// Path to a text file containing YouTube URLs (one per line)
        #[arg(value_name = "URLS_FILE")]
        urls_file: PathBuf,

        /// Output file path; the extension is appended from the format when missing
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Preferred transcript language code (e.g. en, es). Defaults to auto.
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,
    },

    /// Show the effective configuration
    Config,

    /// List supported export formats
    Formats,
}
