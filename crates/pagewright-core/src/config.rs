//! Process-wide configuration for Pagewright
//!
//! All credentials and defaults are read from the environment exactly once at
//! startup. The resulting [`AppConfig`] is immutable and passed to components
//! at construction, so nothing re-reads the process environment per request.

use crate::{PagewrightError, Result};
use std::env;

/// Default chat-completions endpoint (OpenRouter via AI Pipe).
pub const DEFAULT_CHAT_URL: &str = "https://aipipe.org/openrouter/v1/chat/completions";

/// Default GitHub REST API base.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-nano";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret checked against every intake request
    pub shared_secret: String,
    /// Requester email reported to the evaluator
    pub email: String,
    /// GitHub personal access token (never logged)
    pub github_token: String,
    /// GitHub account that owns published repositories
    pub github_username: String,
    /// Generation-provider API key (never logged)
    pub generation_api_key: String,
    /// Author string embedded in generated LICENSE files
    pub author: String,
    /// Chat-completions endpoint
    pub chat_url: String,
    /// GitHub REST API base
    pub github_api_url: String,
    /// Default model for generation requests
    pub default_model: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Absence of a required variable is a startup-time misconfiguration and
    /// returns an error; it is never handled per-request.
    pub fn from_env() -> Result<Self> {
        let shared_secret = required("PAGEWRIGHT_SECRET")?;
        let email = required("PAGEWRIGHT_EMAIL")?;
        let github_token = required("GITHUB_TOKEN")?;
        let github_username = required("GITHUB_USERNAME")?;
        let generation_api_key = required("AIPIPE_API_KEY")?;

        let author = env::var("PAGEWRIGHT_AUTHOR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(Self {
            shared_secret,
            email,
            github_token,
            github_username,
            generation_api_key,
            author,
            chat_url: optional("AIPIPE_CHAT_URL", DEFAULT_CHAT_URL),
            github_api_url: optional("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            default_model: optional("PAGEWRIGHT_MODEL", DEFAULT_MODEL),
        })
    }

    /// Public (unauthenticated) URL of a published repository.
    pub fn repo_url(&self, repo_name: &str) -> String {
        format!("https://github.com/{}/{}", self.github_username, repo_name)
    }

    /// Pages URL the site will be served from once the build completes.
    pub fn pages_url(&self, repo_name: &str) -> String {
        format!("https://{}.github.io/{}/", self.github_username, repo_name)
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            PagewrightError::Config(format!("Missing required environment variable: {}", key))
        })
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}
