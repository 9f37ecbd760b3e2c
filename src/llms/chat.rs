use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::Error;
use crate::schema::{Message, MessageRole};
use crate::traits::{ChatModel, Runnable};
use crate::Result;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "qwen-2.5-32b";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatGroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatGroqRequest {
    model: String,
    messages: Vec<ChatGroqMessage>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    stop: Option<Vec<String>>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatGroqChoice {
    index: u32,
    message: ChatGroqMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatGroqResponse {
    id: String,
    model: String,
    choices: Vec<ChatGroqChoice>,
    usage: Option<ChatGroqUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatGroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Groq chat model implementation (OpenAI-compatible chat completions)
pub struct ChatGroq {
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    top_p: Option<f32>,
    stop: Option<Vec<String>>,
    base_url: String,
    client: reqwest::Client,
}

impl ChatGroq {
    /// Create a new ChatGroq instance.
    ///
    /// An empty or blank API key fails immediately, before any request is made.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: None,
            top_p: None,
            stop: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature parameter
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max_tokens parameter
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Convert messages to the wire format
    fn convert_messages(&self, messages: &[Message]) -> Vec<ChatGroqMessage> {
        messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string();

                ChatGroqMessage {
                    role,
                    content: msg.content.clone(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl Runnable<Vec<Message>, Message> for ChatGroq {
    async fn invoke(&self, input: Vec<Message>) -> Result<Message> {
        if input.is_empty() {
            return Err(Error::Summarization("No messages provided".to_string()));
        }

        let request = ChatGroqRequest {
            model: self.model.clone(),
            messages: self.convert_messages(&input),
            temperature: Some(self.temperature),
            top_p: self.top_p,
            stop: self.stop.clone(),
            max_tokens: self.max_tokens,
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(Error::Request)?;

        // Store status code before consuming the response
        let status = res.status();

        if !status.is_success() {
            let error_text = res.text().await.unwrap_or_default();
            return Err(Error::Summarization(format!(
                "Groq API error: {} - {}",
                status, error_text
            )));
        }

        let response: ChatGroqResponse = res.json().await.map_err(Error::Request)?;

        if response.choices.is_empty() {
            return Err(Error::Summarization(
                "No chat completions returned".to_string(),
            ));
        }

        let choice = &response.choices[0];
        let role = match choice.message.role.as_str() {
            "system" => MessageRole::System,
            "user" => MessageRole::User,
            _ => MessageRole::Assistant,
        };

        Ok(Message::new(role, choice.message.content.clone()))
    }
}

impl ChatModel for ChatGroq {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn parameters(&self) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert("temperature".to_string(), json!(self.temperature));
        if let Some(max_tokens) = self.max_tokens {
            params.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if let Some(top_p) = self.top_p {
            params.insert("top_p".to_string(), json!(top_p));
        }
        params
    }
}
