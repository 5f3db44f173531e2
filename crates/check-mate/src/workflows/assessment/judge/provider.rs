use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use llm::LLMProvider;

use super::{CompletionClient, JudgeError};
use crate::config::LlmConfig;

fn map_backend(provider: &str) -> Result<LLMBackend, JudgeError> {
    match provider {
        "google" | "gemini" => Ok(LLMBackend::Google),
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "ollama" => Ok(LLMBackend::Ollama),
        other => Err(JudgeError::UnsupportedProvider(other.to_string())),
    }
}

/// Hosted-model client built once at startup from [`LlmConfig`].
pub struct LlmCompletionClient {
    provider: Box<dyn LLMProvider>,
}

impl LlmCompletionClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, JudgeError> {
        let backend = map_backend(&config.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&config.model)
            .temperature(config.temperature)
            .timeout_seconds(config.timeout_secs);

        if let Some(api_key) = &config.api_key {
            builder = builder.api_key(api_key);
        }

        let provider = builder
            .build()
            .map_err(|err| JudgeError::Request(format!("build LLM: {err}")))?;

        tracing::info!(provider = %config.provider, model = %config.model, "LLM judge client ready");

        Ok(Self { provider })
    }
}

#[async_trait]
impl CompletionClient for LlmCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = self
            .provider
            .chat(&messages)
            .await
            .map_err(|err| JudgeError::Request(format!("chat: {err}")))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(JudgeError::EmptyResponse),
        }
    }
}
