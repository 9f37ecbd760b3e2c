use tracing::debug;

use crate::document_loaders::{WebLoader, YoutubeTranscriptLoader};
use crate::error::Error;
use crate::schema::{Document, SourceKind};
use crate::traits::DocumentLoader;
use crate::Result;

/// Check that a URL is plausible for the declared source kind.
///
/// Pure validation; performs no network I/O. Platform detection for the
/// video kind is a plain substring check.
pub fn validate_url(url: &str, kind: SourceKind) -> Result<()> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("URL is empty".to_string()));
    }

    if reqwest::Url::parse(trimmed).is_err() {
        return Err(Error::InvalidUrl(trimmed.to_string()));
    }

    if kind == SourceKind::Video
        && !trimmed.contains("youtube.com")
        && !trimmed.contains("youtu.be")
    {
        return Err(Error::InvalidUrl(format!(
            "not a recognizable video URL: {}",
            trimmed
        )));
    }

    Ok(())
}

/// Resolve a URL and source kind into fetched documents.
///
/// Dispatches to the transcript or web page loader; all network I/O happens
/// inside the chosen loader.
pub async fn resolve(url: &str, kind: SourceKind) -> Result<Vec<Document>> {
    validate_url(url, kind)?;
    debug!(url = %url, kind = %kind, "resolving source");

    match kind {
        SourceKind::Video => YoutubeTranscriptLoader::new(url).load().await,
        SourceKind::WebPage => WebLoader::new(url).load().await,
    }
}
