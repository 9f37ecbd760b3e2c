use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{Document, Message, TextChunk};
use crate::Result;

/// Trait for any component that can be invoked with an input and produces an output asynchronously.
///
/// This is the core abstraction for all runnable components in the pipeline, including
/// chat models and summary chains.
#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: 'static> {
    /// Run the component on the given input and return the output.
    async fn invoke(&self, input: Input) -> Result<Output>;

    /// Stream the output of the component (default: wraps invoke in a stream).
    async fn stream(
        &self,
        input: Input,
    ) -> Result<impl futures::Stream<Item = Result<Output>> + Send>
    where
        Self: Sized,
        Output: Send,
    {
        let output = self.invoke(input).await?;
        Ok(futures::stream::once(async move { Ok(output) }))
    }

    /// Run the component on a batch of inputs.
    async fn batch(&self, inputs: Vec<Input>) -> Result<Vec<Result<Output>>>
    where
        Self: Sized,
        Input: Sync,
        Output: Send,
    {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(self.invoke(input).await);
        }
        Ok(results)
    }
}

/// Trait for chat models that can handle message exchanges.
#[async_trait]
pub trait ChatModel: Runnable<Vec<Message>, Message> {
    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
    /// Get model parameters as a key-value map.
    fn parameters(&self) -> HashMap<String, Value>;
}

/// Trait for document loaders (video transcript, web page).
#[async_trait]
pub trait DocumentLoader {
    /// Load documents from a source.
    async fn load(&self) -> Result<Vec<Document>>;
}

/// Trait for text splitters (chunking documents/text).
pub trait TextSplitter {
    /// Split documents into chunks carrying their origin metadata.
    fn split_documents(&self, documents: Vec<Document>) -> Result<Vec<TextChunk>>;
    /// Split text into chunks.
    fn split_text(&self, text: &str) -> Result<Vec<String>>;
}
