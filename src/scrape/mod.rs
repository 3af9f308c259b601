use anyhow::{Context, Result};
use std::path::Path;

use crate::extractors::{extract_video_id, TranscriptFetcher};
use crate::record::Record;

/// Read a URL list file: one URL per line, blank lines and `#` comments
/// ignored. The file must exist and yield at least one URL or the run
/// aborts before any fetching starts.
pub fn read_urls_file(path: &Path) -> Result<Vec<String>> {
    let content = fs_err::read_to_string(path).context("Failed to read URLs file")?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        anyhow::bail!("No valid URLs found in file: {}", path.display());
    }

    Ok(urls)
}

/// Sequential scrape pipeline: resolve each URL to a video ID, fetch its
/// transcript, and collect one record per success.
///
/// Per-item failures (unresolvable URL, missing captions, network error)
/// are logged and skipped so one bad video cannot abort the batch.
pub struct TranscriptScraper<F> {
    fetcher: F,
    language: Option<String>,
}

impl<F: TranscriptFetcher> TranscriptScraper<F> {
    pub fn new(fetcher: F, language: Option<String>) -> Self {
        Self { fetcher, language }
    }

    pub async fn scrape(&self, urls: &[String]) -> Vec<Record> {
        let mut records = Vec::new();

        for url in urls {
            let Some(video_id) = extract_video_id(url) else {
                tracing::warn!("Could not extract video ID from URL: {}", url);
                continue;
            };

            tracing::info!("Fetching transcript for video_id={}", video_id);
            let transcript = match self
                .fetcher
                .fetch_transcript(&video_id, self.language.as_deref())
                .await
            {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("No transcript for video_id={}; skipping: {}", video_id, err);
                    continue;
                }
            };

            let mut record = Record::new();
            record.insert("video_id", video_id);
            record.insert("transcript", transcript);
            records.push(record);
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScraperError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Write;

    struct StubFetcher {
        transcripts: HashMap<String, String>,
    }

    #[async_trait]
    impl TranscriptFetcher for StubFetcher {
        async fn fetch_transcript(&self, video_id: &str, _language: Option<&str>) -> crate::Result<String> {
            self.transcripts
                .get(video_id)
                .cloned()
                .ok_or_else(|| ScraperError::TranscriptUnavailable(video_id.to_string()).into())
        }
    }

    fn scraper_with(transcripts: &[(&str, &str)]) -> TranscriptScraper<StubFetcher> {
        let transcripts = transcripts
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect();
        TranscriptScraper::new(StubFetcher { transcripts }, None)
    }

    #[tokio::test]
    async fn test_scrape_collects_records_in_input_order() {
        let scraper = scraper_with(&[("abc", "first"), ("def", "second")]);
        let urls = vec![
            "https://youtu.be/abc".to_string(),
            "https://www.youtube.com/watch?v=def".to_string(),
        ];

        let records = scraper.scrape(&urls).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("video_id"), Some("abc"));
        assert_eq!(records[0].get("transcript"), Some("first"));
        assert_eq!(records[1].get("video_id"), Some("def"));
    }

    #[tokio::test]
    async fn test_scrape_skips_unresolvable_urls_and_failed_fetches() {
        let scraper = scraper_with(&[("ok1", "kept")]);
        let urls = vec![
            "not a url".to_string(),
            "https://youtu.be/missing".to_string(),
            "https://youtu.be/ok1".to_string(),
        ];

        let records = scraper.scrape(&urls).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("video_id"), Some("ok1"));
    }

    #[tokio::test]
    async fn test_scrape_empty_batch_yields_no_records() {
        let scraper = scraper_with(&[]);
        assert!(scraper.scrape(&[]).await.is_empty());
    }

    #[test]
    fn test_read_urls_file_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://youtu.be/abc  ").unwrap();
        writeln!(file, "https://youtu.be/def").unwrap();

        let urls = read_urls_file(file.path()).unwrap();
        assert_eq!(urls, vec!["https://youtu.be/abc", "https://youtu.be/def"]);
    }

    #[test]
    fn test_read_urls_file_rejects_missing_and_empty_files() {
        assert!(read_urls_file(Path::new("does-not-exist.txt")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# only a comment").unwrap();
        let err = read_urls_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("No valid URLs"));
    }
}
