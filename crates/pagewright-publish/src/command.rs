//! Git command execution abstraction

use async_trait::async_trait;
use pagewright_core::{PagewrightError, Result};
use std::path::Path;
use std::process::Output;
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::debug;

/// Output from a git command
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl GitOutput {
    /// A successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// A failed output with the given stderr.
    pub fn err(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

impl From<Output> for GitOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Trait for executing git commands (allows mocking in tests)
///
/// Unlike a repository-scoped executor, the working directory is passed per
/// call: every task owns a fresh temporary tree and the same executor serves
/// all of them.
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Execute a git command in the given working directory
    async fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;
}

/// Real git command executor
#[derive(Debug, Clone, Default)]
pub struct GitCommand;

#[async_trait]
impl GitExecutor for GitCommand {
    async fn exec(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        debug!("Executing git {:?} in {}", args.first(), dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| PagewrightError::Git(format!("Failed to execute git: {}", e)))?;

        let git_output = GitOutput::from(output);

        if !git_output.success {
            // stderr may quote the authenticated remote URL; callers redact
            // it before it can reach a log line
            debug!("Git command {:?} failed", args.first());
        }

        Ok(git_output)
    }
}

/// Mock git executor for testing
///
/// Responses are keyed by the joined argument string; unscripted commands
/// succeed with empty output. Every call is recorded in order.
#[derive(Clone, Default)]
pub struct MockGitExecutor {
    responses: Arc<Mutex<std::collections::HashMap<String, GitOutput>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGitExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, command: &str, output: GitOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), output);
        self
    }

    /// Commands executed so far, as joined argument strings in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitExecutor for MockGitExecutor {
    async fn exec(&self, _dir: &Path, args: &[&str]) -> Result<GitOutput> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| GitOutput::ok("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_mock_executor_scripted_response() {
        let executor = MockGitExecutor::new()
            .with_response("rev-parse HEAD", GitOutput::ok("abc123\n"));

        let output = executor
            .exec(&PathBuf::from("/tmp"), &["rev-parse", "HEAD"])
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "abc123");
        assert_eq!(executor.calls(), vec!["rev-parse HEAD"]);
    }

    #[tokio::test]
    async fn test_mock_executor_defaults_to_success() {
        let executor = MockGitExecutor::new();
        let output = executor
            .exec(&PathBuf::from("/tmp"), &["add", "."])
            .await
            .unwrap();
        assert!(output.success);
    }

    #[tokio::test]
    async fn test_real_executor_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let output = GitCommand
            .exec(dir.path(), &["rev-parse", "HEAD"])
            .await
            .unwrap();
        assert!(!output.success);
    }
}
