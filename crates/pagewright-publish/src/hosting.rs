//! GitHub REST API client: repository creation, file fetch, pages activation

use async_trait::async_trait;
use base64::Engine;
use pagewright_core::{AppConfig, PagewrightError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Repository creation treats "already exists" (422) as success, so
/// re-running a task against an existing repository is idempotent.
pub fn create_status_ok(status: u16) -> bool {
    matches!(status, 201 | 422)
}

/// Pages activation treats newly-enabled (201), already-enabled (204) and
/// idempotent-conflict (409) as enabled.
pub fn pages_status_enabled(status: u16) -> bool {
    matches!(status, 201 | 204 | 409)
}

/// Trait for the repository-hosting provider (allows mocking in tests)
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Idempotent create; returns the public repository URL.
    async fn create_remote(&self, id: &str, description: &str) -> Result<String>;

    /// Fetch a file from the remote repository at the given branch.
    async fn fetch_file(&self, id: &str, path: &str, branch: &str) -> Result<String>;

    /// Activate pages hosting for the branch. Non-fatal: any unexpected
    /// status is logged and reported as `false`.
    async fn enable_pages(&self, id: &str, branch: &str) -> bool;
}

#[derive(Debug, Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
}

/// Real GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
    username: String,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.github_api_url.clone(),
            token: config.github_token.clone(),
            username: config.github_username.clone(),
        }
    }

    fn repo_url(&self, id: &str) -> String {
        format!("https://github.com/{}/{}", self.username, id)
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn create_remote(&self, id: &str, description: &str) -> Result<String> {
        let url = format!("{}/user/repos", self.api_base);
        let body = CreateRepoBody {
            name: id,
            description,
            private: false,
            auto_init: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "pagewright")
            .json(&body)
            .timeout(API_TIMEOUT)
            .send()
            .await
            .map_err(|e| PagewrightError::Publish(format!("Repo creation request failed: {}", e)))?;

        let status = response.status().as_u16();
        if create_status_ok(status) {
            info!("Repo creation response for {}: {}", id, status);
            return Ok(self.repo_url(id));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown".to_string());
        Err(PagewrightError::Publish(format!(
            "Failed to create repo {}: {} {}",
            id, status, error_text
        )))
    }

    async fn fetch_file(&self, id: &str, path: &str, branch: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base, self.username, id, path, branch
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("User-Agent", "pagewright")
            .timeout(API_TIMEOUT)
            .send()
            .await
            .map_err(|e| PagewrightError::Fetch(format!("Contents request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(PagewrightError::Fetch(format!(
                "Cannot fetch {} from {}: {} {}",
                path, id, status, error_text
            )));
        }

        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| PagewrightError::Fetch(format!("Malformed contents response: {}", e)))?;

        decode_contents(&contents.content)
    }

    async fn enable_pages(&self, id: &str, branch: &str) -> bool {
        let url = format!(
            "{}/repos/{}/{}/pages",
            self.api_base, self.username, id
        );
        let body = serde_json::json!({ "source": { "branch": branch, "path": "/" } });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "pagewright")
            .json(&body)
            .timeout(API_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                if pages_status_enabled(status) {
                    info!("Pages enabled for {} ({})", id, status);
                    true
                } else {
                    warn!("Failed to enable pages for {}: status {}", id, status);
                    false
                }
            }
            Err(e) => {
                warn!("Pages activation request failed for {}: {}", id, e);
                false
            }
        }
    }
}

/// Decode a base64 payload from the contents API.
///
/// GitHub wraps base64 bodies with line breaks, which must be stripped before
/// decoding.
fn decode_contents(content: &str) -> Result<String> {
    let clean: String = content.split_whitespace().collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(clean)
        .map_err(|e| PagewrightError::Fetch(format!("Invalid base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| PagewrightError::Fetch(format!("File content is not UTF-8: {}", e)))
}
