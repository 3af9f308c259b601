//! YouTube Transcript Scraper - A Rust CLI tool for bulk transcript extraction
//!
//! This library reads a list of YouTube URLs, resolves each one to a video ID,
//! fetches the available transcript, and exports the collected records to
//! JSON, CSV, Excel, HTML, or XML.

pub mod cli;
pub mod config;
pub mod export;
pub mod extractors;
pub mod record;
pub mod scrape;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use export::ExportFormat;
pub use extractors::{extract_video_id, TranscriptFetcher, YoutubeTranscriptFetcher};
pub use record::Record;
pub use scrape::TranscriptScraper;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the scraper
#[derive(thiserror::Error, Debug)]
pub enum ScraperError {
    #[error("No transcript available for video: {0}")]
    TranscriptUnavailable(String),

    #[error("Could not locate player data for video: {0}")]
    PlayerDataMissing(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}
