use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::prompts::StringPromptTemplate;
use crate::resolver;
use crate::schema::{Message, SourceKind, TextChunk};
use crate::text_splitters::{ChunkConfig, RecursiveCharacterTextSplitter};
use crate::traits::{ChatModel, Runnable, TextSplitter};
use crate::Result;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that provides clear and concise summaries.";

const SUMMARY_TEMPLATE: &str = "Please provide a comprehensive summary of the following content. \
Include the main points and key takeaways in a well-structured format.\n\n\
Content: {context}\n\n\
Summary:";

/// Chain that stuffs all chunks into a single prompt and asks a chat model
/// for a summary
pub struct SummaryChain<C> {
    model: C,
    prompt: StringPromptTemplate,
}

impl<C: ChatModel + Send + Sync> SummaryChain<C> {
    /// Create a new summary chain with the default instruction template
    pub fn new(model: C) -> Self {
        Self {
            model,
            prompt: StringPromptTemplate::from_template(SUMMARY_TEMPLATE),
        }
    }

    /// Replace the instruction template; it must take a `{context}` variable
    pub fn with_prompt(mut self, prompt: StringPromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }
}

#[async_trait]
impl<C: ChatModel + Send + Sync> Runnable<Vec<TextChunk>, String> for SummaryChain<C> {
    async fn invoke(&self, input: Vec<TextChunk>) -> Result<String> {
        let context = input
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut values = HashMap::new();
        values.insert("context".to_string(), json!(context));
        let user_prompt = self.prompt.format(&values)?;

        debug!(
            model = self.model.model_name(),
            chunks = input.len(),
            "invoking summary chain"
        );

        let reply = self
            .model
            .invoke(vec![Message::system(SYSTEM_PROMPT), Message::user(user_prompt)])
            .await?;

        Ok(reply.content)
    }
}

/// End-to-end pipeline: validate the URL, fetch the source, split it into
/// chunks, and ask the chat model for a summary.
///
/// One call runs to completion or to its first failure; nothing is retried
/// and no state is shared between calls.
pub struct Summarizer<C> {
    chain: SummaryChain<C>,
    chunk_config: ChunkConfig,
}

impl<C: ChatModel + Send + Sync> Summarizer<C> {
    /// Create a new summarizer around a chat model
    pub fn new(model: C) -> Self {
        Self {
            chain: SummaryChain::new(model),
            chunk_config: ChunkConfig::default(),
        }
    }

    /// Set the chunking configuration
    pub fn with_chunk_config(mut self, chunk_config: ChunkConfig) -> Self {
        self.chunk_config = chunk_config;
        self
    }

    /// Summarize the content behind a URL
    pub async fn summarize(&self, url: &str, kind: SourceKind) -> Result<String> {
        let documents = resolver::resolve(url, kind).await?;

        let splitter = RecursiveCharacterTextSplitter::new(self.chunk_config);
        let chunks = splitter.split_documents(documents)?;

        info!(url = %url, kind = %kind, chunks = chunks.len(), "summarizing");
        self.chain.invoke(chunks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::llms::{ChatGroq, MockChatModel};
    use crate::schema::SourceMetadata;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_chain_stuffs_chunks_into_prompt() {
        // Echo the prompt back so the test can inspect what the model saw.
        struct EchoModel;

        #[async_trait]
        impl Runnable<Vec<Message>, Message> for EchoModel {
            async fn invoke(&self, input: Vec<Message>) -> Result<Message> {
                Ok(Message::assistant(input.last().unwrap().content.clone()))
            }
        }

        impl ChatModel for EchoModel {
            fn model_name(&self) -> &str {
                "echo"
            }
            fn parameters(&self) -> HashMap<String, serde_json::Value> {
                HashMap::new()
            }
        }

        let metadata = SourceMetadata::new("https://example.com", SourceKind::WebPage);
        let chunks = vec![
            TextChunk::new("first chunk", metadata.clone()),
            TextChunk::new("second chunk", metadata),
        ];

        let prompt = SummaryChain::new(EchoModel).invoke(chunks).await.unwrap();

        assert!(prompt.contains("first chunk"));
        assert!(prompt.contains("second chunk"));
        assert!(prompt.contains("main points and key takeaways"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_empty_url() {
        let summarizer = Summarizer::new(MockChatModel::new());
        let err = summarizer
            .summarize("", SourceKind::WebPage)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_summarize_web_page_end_to_end() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/article");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<html><body><p>Rust is a systems language.</p></body></html>");
            })
            .await;
        let completions = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_contains("Rust is a systems language.");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "id": "chatcmpl-1",
                        "model": "qwen-2.5-32b",
                        "choices": [{
                            "index": 0,
                            "message": {"role": "assistant", "content": "Rust, summarized."},
                            "finish_reason": "stop"
                        }],
                        "usage": null
                    }));
            })
            .await;

        let model = ChatGroq::new("test-key")
            .unwrap()
            .with_base_url(server.base_url());
        let summary = Summarizer::new(model)
            .summarize(&server.url("/article"), SourceKind::WebPage)
            .await
            .unwrap();

        page.assert_async().await;
        completions.assert_async().await;
        assert_eq!(summary, "Rust, summarized.");
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        assert!(matches!(ChatGroq::new(""), Err(Error::MissingCredential)));
    }
}
