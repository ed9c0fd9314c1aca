use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TextGenConfig;

pub const DEFAULT_SYSTEM_PROMPT: &str = "Ты полезный AI-ассистент. Отвечай на русском языке.";
pub const DEFAULT_IDEA_CATEGORY: &str = "бизнес";

const PSX_IDEA_PROMPT: &str = "Generate a unique PSX-style 3D asset idea. Think retro low-poly aesthetic from PlayStation 1 era: pixelated textures, affine texture warping, no perspective correction, 16-bit color palette. Suggest specific objects like: retro electronics, vending machines, household items, packaging, street objects. Keep it practical for a solo 3D artist. Return only the idea text, no extra fluff.";

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("API key is not configured (set GROQ_API_KEY or text_gen.api_key)")]
    MissingApiKey,
    #[error("chat API answered with status {0}")]
    Status(u16),
    #[error("chat API request failed: {0}")]
    Transport(String),
    #[error("chat API returned no choices")]
    EmptyResponse,
}

impl From<ureq::Error> for TextGenError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => TextGenError::Status(code),
            other => TextGenError::Transport(other.to_string()),
        }
    }
}

pub trait TextGenerator {
    /// Sends `prompt` as the user message, preceded by `system_prompt` if any.
    fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, TextGenError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatRequest {
    pub fn new(model: &str, prompt: &str, system_prompt: Option<&str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        Self {
            model: model.to_string(),
            messages,
        }
    }
}

impl ChatResponse {
    pub fn into_text(self) -> Result<String, TextGenError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(TextGenError::EmptyResponse)
    }
}

/// Blocking chat completion client.
pub struct ChatClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &TextGenConfig) -> Result<Self, TextGenError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(TextGenError::MissingApiKey)?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Ok(Self {
            agent,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl TextGenerator for ChatClient {
    fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, TextGenError> {
        let request = ChatRequest::new(&self.model, prompt, system_prompt);
        log::debug!("chat completion: model={} endpoint={}", self.model, self.endpoint);

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(&request)?;
        log::debug!("chat completion status: {}", response.status());

        let parsed: ChatResponse = response.body_mut().read_json()?;
        parsed.into_text()
    }
}

pub fn idea_prompt(category: &str) -> String {
    match category {
        "psx" => PSX_IDEA_PROMPT.to_string(),
        _ => format!(
            "Generate a unique and creative project idea for the category: {}. The idea should be innovative and interesting for an 18-year-old developer and 3D artist. Return only the idea text, no extra fluff.",
            category
        ),
    }
}

pub fn code_prompt(language: &str, task: &str) -> String {
    format!(
        "Generate working code in {} for: {}. Return only the code, no explanations. Include comments if needed. Make it complete and runnable.",
        language, task
    )
}
