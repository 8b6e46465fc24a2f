//! Chat-completions client for document generation
//!
//! Key design: each generation call is a fresh, independent single-turn
//! exchange. No conversation state is kept between calls, and the returned
//! text is exactly what the provider produced; check satisfaction is judged
//! entirely out-of-process by the evaluator.

use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use pagewright_core::{AppConfig, PagewrightError, Result};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for document generation (allows mocking in tests)
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send a prompt to the provider and return the generated document.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Real chat-completions client
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    chat_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Create a client from process configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_model(config, &config.default_model)
    }

    /// Create a client pinned to a specific model.
    pub fn with_model(config: &AppConfig, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            chat_url: config.chat_url.clone(),
            api_key: config.generation_api_key.clone(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Generator for ChatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            "Sending generation request ({} prompt chars, model {})",
            prompt.len(),
            self.model
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PagewrightError::Generation(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(PagewrightError::Generation(format!(
                "Provider error {}: {}",
                status, error_text
            )));
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| PagewrightError::Generation(format!("Failed to parse response: {}", e)))?;

        let content = envelope.first_content().ok_or_else(|| {
            PagewrightError::Generation("No choices in provider response".to_string())
        })?;

        tracing::info!("Generation complete ({} chars)", content.len());
        Ok(content)
    }
}

/// Mock generator for testing
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    document: String,
    prompts: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    fail: bool,
}

impl MockGenerator {
    pub fn returning(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            prompts: Default::default(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(PagewrightError::Generation("mock failure".to_string()));
        }
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator_records_prompts() {
        let generator = MockGenerator::returning("<!DOCTYPE html><html></html>");
        let document = generator.generate("make a page").await.unwrap();

        assert!(document.starts_with("<!DOCTYPE html>"));
        assert_eq!(generator.prompts(), vec!["make a page"]);
    }

    #[tokio::test]
    async fn test_mock_generator_failure() {
        let generator = MockGenerator::failing();
        assert!(generator.generate("anything").await.is_err());
    }
}
