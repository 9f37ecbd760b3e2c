use async_trait::async_trait;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::Error;
use crate::schema::{Document, SourceKind, SourceMetadata};
use crate::traits::DocumentLoader;
use crate::Result;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Elements whose text content is never page prose
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "head"];

/// Loader that retrieves a web page and extracts its readable text
pub struct WebLoader {
    url: String,
    user_agent: String,
    client: reqwest::Client,
}

impl WebLoader {
    /// Create a new web page loader
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the User-Agent header sent with the request
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Extract the readable text of an HTML document, with runs of whitespace
/// collapsed to single spaces
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<String> = Vec::new();
    collect_text(document.root_element(), &mut parts);

    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text(element: ElementRef, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(text.to_string());
        } else if let Some(el) = ElementRef::wrap(child) {
            if SKIPPED_ELEMENTS.contains(&el.value().name()) {
                continue;
            }
            collect_text(el, out);
        }
    }
}

#[async_trait]
impl DocumentLoader for WebLoader {
    async fn load(&self) -> Result<Vec<Document>> {
        debug!(url = %self.url, "fetching web page");

        let res = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(Error::Request)?;

        let status = res.status();

        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let html = res.text().await.map_err(Error::Request)?;
        let text = extract_text(&html);

        if text.is_empty() {
            return Err(Error::EmptyContent(self.url.clone()));
        }

        debug!(url = %self.url, chars = text.len(), "web page extracted");

        Ok(vec![Document::new(
            text,
            SourceMetadata::new(self.url.clone(), SourceKind::WebPage),
        )])
    }
}
