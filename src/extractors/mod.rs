use async_trait::async_trait;

pub mod youtube;

pub use youtube::{extract_video_id, YoutubeTranscriptFetcher};

use crate::Result;

/// Trait for fetching a transcript by video ID.
///
/// The scrape pipeline only depends on this seam, so tests can substitute a
/// stub fetcher instead of touching the network.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript for a video as one normalized string.
    ///
    /// `language` is a preferred caption language code (e.g. "en", "es");
    /// when absent the first available track is used.
    async fn fetch_transcript(&self, video_id: &str, language: Option<&str>) -> Result<String>;
}
