use thiserror::Error;

/// Error type for the condense pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// URL was empty or malformed for the declared source kind
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No video identifier could be extracted from the URL
    #[error("Could not extract a video id from URL: {0}")]
    IdExtraction(String),

    /// The video has no usable caption track
    #[error("No transcript available for video: {0}")]
    NoTranscript(String),

    /// HTTP request completed with a non-success status
    #[error("Fetch failed with status {status}: {url}")]
    Fetch { status: u16, url: String },

    /// Transport-level HTTP error
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The fetched source yielded no extractable text
    #[error("No text content extracted from: {0}")]
    EmptyContent(String),

    /// Chunk overlap must stay strictly below chunk size
    #[error("Invalid chunk config: overlap {chunk_overlap} must be smaller than chunk size {chunk_size}")]
    InvalidChunkConfig {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    /// Prompt template error
    #[error("Prompt template error: {0}")]
    PromptTemplate(String),

    /// The completion API returned an error or an unusable response
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// No API credential was supplied
    #[error("Missing API credential")]
    MissingCredential,

    /// JSON serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
