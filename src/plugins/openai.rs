//! Chat-completion client used by the LLM playlist generator

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::models::Category;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Anything that can answer a chat prompt with text
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// OpenAI-compatible `chat/completions` endpoint
pub struct OpenAiPlugin {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiPlugin {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build LLM http client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl ChatModel for OpenAiPlugin {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if !self.enabled() {
            return Err(anyhow!("No LLM api key configured"));
        }

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        debug!("Requesting chat completion from {} ({})", self.api_url, self.model);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("LLM request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("LLM endpoint returned {}: {}", status, text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to decode LLM response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("LLM response had no choices"))
    }
}

/// Prompt asking for the five category playlists as JSON
pub fn playlist_prompt(seeds: &[String], target: usize) -> Vec<ChatMessage> {
    let categories = Category::ALL
        .iter()
        .map(|c| format!("- {}: {}", c.as_str(), c.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let system = "You are a music curator. Reply with JSON only, no prose.";
    let user = format!(
        "Based on these liked songs: {}\n\n\
         Generate 5 playlists with {} songs each for these categories:\n{}\n\n\
         Keep the listener's languages and regional taste. \
         Return songs in \"Artist - Song Name\" format, no repeats within a playlist.\n\
         Reply format: {{\"playlists\":[{{\"category\":\"Mix\",\"songs\":[\"Artist - Song Name\"]}}]}}",
        seeds.join(", "),
        target,
        categories
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
