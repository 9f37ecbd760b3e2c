use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::schema::{Document, SourceKind, SourceMetadata, TranscriptSegment};
use crate::traits::DocumentLoader;
use crate::Result;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Extract a video id from a YouTube URL.
///
/// Two URL shapes are recognized: the short-link form where the id is the
/// final path segment, and the canonical watch form where the id is the
/// value of the `v` query parameter (truncated at the next `&`).
pub fn extract_video_id(url: &str) -> Option<String> {
    if url.contains("youtu.be") {
        let without_query = url.split('?').next().unwrap_or(url);
        return without_query
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(String::from);
    }

    if url.contains("youtube.com") {
        if let Some((_, tail)) = url.split_once("v=") {
            let id = tail.split('&').next().unwrap_or(tail);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    None
}

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    t_start_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Loader that retrieves the caption track of a YouTube video as one document
pub struct YoutubeTranscriptLoader {
    url: String,
    language: String,
    base_url: String,
    client: reqwest::Client,
}

impl YoutubeTranscriptLoader {
    /// Create a new transcript loader for a video URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: "en".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the caption language to request
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Override the captioning endpoint base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the timed-text track for a video id as ordered segments
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let request_url = format!(
            "{}/api/timedtext?v={}&lang={}&fmt=json3",
            self.base_url, video_id, self.language
        );

        let res = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(Error::Request)?;

        let status = res.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NoTranscript(video_id.to_string()));
        }

        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                url: request_url,
            });
        }

        // The endpoint answers 200 with an empty body when no track exists
        let body = res.text().await.map_err(Error::Request)?;
        if body.trim().is_empty() {
            return Err(Error::NoTranscript(video_id.to_string()));
        }

        let payload: TimedTextResponse = serde_json::from_str(&body)?;

        let segments: Vec<TranscriptSegment> = payload
            .events
            .into_iter()
            .filter_map(|event| {
                let text: String = event
                    .segs
                    .iter()
                    .map(|seg| seg.utf8.as_str())
                    .collect();
                if text.trim().is_empty() {
                    return None;
                }
                Some(TranscriptSegment {
                    text: text.trim().to_string(),
                    start_time: event.t_start_ms as f64 / 1000.0,
                })
            })
            .collect();

        if segments.is_empty() {
            return Err(Error::NoTranscript(video_id.to_string()));
        }

        Ok(segments)
    }
}

#[async_trait]
impl DocumentLoader for YoutubeTranscriptLoader {
    async fn load(&self) -> Result<Vec<Document>> {
        let video_id =
            extract_video_id(&self.url).ok_or_else(|| Error::IdExtraction(self.url.clone()))?;

        debug!(video_id = %video_id, "fetching transcript");
        let segments = self.fetch_segments(&video_id).await?;
        debug!(video_id = %video_id, segments = segments.len(), "transcript fetched");

        let full_transcript = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(vec![Document::new(
            full_transcript,
            SourceMetadata::new(self.url.clone(), SourceKind::Video),
        )])
    }
}
