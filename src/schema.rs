use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of source a document was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Video,
    WebPage,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Video => write!(f, "video"),
            SourceKind::WebPage => write!(f, "webpage"),
        }
    }
}

/// Origin information carried by every document and every chunk cut from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// The URL the content was fetched from
    pub origin_url: String,

    /// Whether the content came from a video transcript or a web page
    pub kind: SourceKind,
}

impl SourceMetadata {
    /// Create metadata for a source URL
    pub fn new(origin_url: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            origin_url: origin_url.into(),
            kind,
        }
    }
}

/// Document represents a piece of fetched text and where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The document's content
    pub page_content: String,

    /// Origin metadata associated with the document
    pub metadata: SourceMetadata,
}

impl Document {
    /// Create a new document with the given content and origin
    pub fn new(page_content: impl Into<String>, metadata: SourceMetadata) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }
}

/// One timed caption line as delivered by the captioning service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text
    pub text: String,

    /// Playback offset in seconds
    pub start_time: f64,
}

/// A bounded-size fragment of a document prepared for LLM consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// The chunk's text, at most the configured chunk size
    pub text: String,

    /// Origin metadata copied from the document this chunk was cut from
    pub metadata: SourceMetadata,
}

impl TextChunk {
    /// Create a new chunk carrying its document's origin metadata
    pub fn new(text: impl Into<String>, metadata: SourceMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Message role types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A chat message, containing content and a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The message role
    pub role: MessageRole,

    /// The message content
    pub content: String,

    /// Optional ID for the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Message {
    /// Create a new message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}
