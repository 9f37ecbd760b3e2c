use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::Message;
use crate::traits::{ChatModel, Runnable};
use crate::Result;

/// A mock chat model implementation for testing
pub struct MockChatModel {
    responses: HashMap<String, String>,
    default_response: String,
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: "This is a mock response.".to_string(),
        }
    }
}

impl MockChatModel {
    /// Create a new mock chat model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response keyed on the content of the last message
    pub fn with_response(mut self, input: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(input.into(), response.into());
        self
    }

    /// Set the default response
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }
}

#[async_trait]
impl Runnable<Vec<Message>, Message> for MockChatModel {
    async fn invoke(&self, input: Vec<Message>) -> Result<Message> {
        let reply = input
            .last()
            .and_then(|msg| self.responses.get(&msg.content))
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        Ok(Message::assistant(reply))
    }
}

impl ChatModel for MockChatModel {
    fn model_name(&self) -> &str {
        "mock-chat"
    }

    fn parameters(&self) -> HashMap<String, Value> {
        HashMap::new()
    }
}
