use anyhow::Context;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::TranscriptFetcher;
use crate::utils::join_segments;
use crate::{Result, ScraperError};

const WATCH_BASE: &str = "https://www.youtube.com/watch";

/// Browser-like user agent; the watch page serves a reduced payload without one.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Extract the video ID from a variety of YouTube URL formats.
///
/// Examples:
///     https://www.youtube.com/watch?v=dQw4w9WgXcQ
///     https://youtu.be/dQw4w9WgXcQ
///     https://www.youtube.com/embed/dQw4w9WgXcQ
///
/// Rules are tried in priority order and the first match wins. Malformed
/// URLs never panic; they simply yield `None` so a bad line in a batch
/// cannot abort the rest of it.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().unwrap_or("").to_ascii_lowercase();
    let path = parsed.path();

    // youtu.be short link: the ID is the whole path
    if host.contains("youtu.be") {
        let id = path.trim_start_matches('/');
        if id.is_empty() {
            return None;
        }
        return Some(id.to_string());
    }

    // Standard watch URL or anything else carrying ?v=
    if let Some((_, value)) = parsed
        .query_pairs()
        .find(|(name, value)| name.as_ref() == "v" && !value.is_empty())
    {
        return Some(value.into_owned());
    }

    // Embedded format: /embed/<id>
    let parts: Vec<&str> = path.split('/').collect();
    if let Some(idx) = parts.iter().position(|part| *part == "embed") {
        return parts
            .get(idx + 1)
            .filter(|next| !next.is_empty())
            .map(|next| next.to_string());
    }

    // Fallback: a path that looks like /VIDEO_ID
    if parts.len() == 2 && !parts[1].is_empty() {
        return Some(parts[1].to_string());
    }

    None
}

/// A caption track advertised by the watch page player data.
#[derive(Debug, Clone)]
struct CaptionTrack {
    base_url: String,
    language_code: String,
}

/// Fetches transcripts from YouTube's caption endpoints.
///
/// The flow mirrors what the watch page itself does: load the page, read the
/// embedded `ytInitialPlayerResponse`, pick a caption track, and download the
/// timedtext XML it points at.
pub struct YoutubeTranscriptFetcher {
    client: reqwest::Client,
    watch_base: String,
}

impl YoutubeTranscriptFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            watch_base: WATCH_BASE.to_string(),
        })
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.watch_base)
            .query(&[("v", video_id)])
            .send()
            .await
            .with_context(|| format!("Failed to request watch page for video {video_id}"))?;

        let body = response
            .error_for_status()
            .with_context(|| format!("Watch page request failed for video {video_id}"))?
            .text()
            .await
            .context("Failed to read watch page body")?;

        Ok(body)
    }

    async fn fetch_caption_xml(&self, track_url: &str) -> Result<String> {
        let response = self
            .client
            .get(track_url)
            .send()
            .await
            .context("Failed to request caption track")?;

        let body = response
            .error_for_status()
            .context("Caption track request failed")?
            .text()
            .await
            .context("Failed to read caption track body")?;

        Ok(body)
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch_transcript(&self, video_id: &str, language: Option<&str>) -> Result<String> {
        let html = self.fetch_watch_page(video_id).await?;

        let player = extract_player_response(&html)
            .ok_or_else(|| ScraperError::PlayerDataMissing(video_id.to_string()))?;

        let tracks = caption_tracks(&player);
        let track = select_track(&tracks, language)
            .ok_or_else(|| ScraperError::TranscriptUnavailable(video_id.to_string()))?;

        tracing::debug!(
            "Using caption track language={} for video_id={}",
            track.language_code,
            video_id
        );

        let xml = self.fetch_caption_xml(&track.base_url).await?;
        let segments = parse_caption_xml(&xml)?;

        if segments.is_empty() {
            return Err(ScraperError::TranscriptUnavailable(video_id.to_string()).into());
        }

        Ok(join_segments(&segments, " "))
    }
}

/// Pull the first JSON value following the `ytInitialPlayerResponse` marker.
///
/// The stream deserializer stops at the end of the JSON object, so the
/// trailing `;var meta = ...` script content is ignored.
fn extract_player_response(html: &str) -> Option<Value> {
    let marker = "ytInitialPlayerResponse = ";
    let start = html.find(marker)? + marker.len();

    serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()?
        .ok()
}

fn caption_tracks(player: &Value) -> Vec<CaptionTrack> {
    player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .map(|tracks| {
            tracks
                .iter()
                .filter_map(|track| {
                    Some(CaptionTrack {
                        base_url: track.get("baseUrl")?.as_str()?.to_string(),
                        language_code: track.get("languageCode")?.as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Pick a caption track, preferring an exact language match, then a regional
/// variant ("en" matches "en-GB"), then the first track when no preference
/// was given. A preference that matches nothing yields `None` rather than
/// silently falling back to another language.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: Option<&str>) -> Option<&'a CaptionTrack> {
    match language {
        Some(lang) => tracks
            .iter()
            .find(|track| track.language_code == lang)
            .or_else(|| {
                tracks
                    .iter()
                    .find(|track| track.language_code.starts_with(&format!("{lang}-")))
            }),
        None => tracks.first(),
    }
}

/// Parse timedtext XML into the text of its `<text>` elements.
fn parse_caption_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) if e.name().as_ref() == b"text" => {
                in_text = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"text" => {
                in_text = false;
                if !current.trim().is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().context("Invalid caption markup")?;
                current.push_str(&text);
            }
            Ok(_) => {}
            Err(e) => anyhow::bail!("Failed to parse caption XML: {e}"),
        }
        buf.clear();
    }

    Ok(segments)
}
