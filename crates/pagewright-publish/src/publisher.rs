//! Commit-and-push publishing of a working tree
//!
//! The remote branch's history is fully owned by this pipeline: every publish
//! force-pushes the freshly generated tree, so re-running a task converges the
//! remote on the new content instead of merging. A commit is only created when
//! the stage is non-empty, so re-publishing unchanged content never grows the
//! history.

use crate::command::{GitExecutor, GitOutput};
use pagewright_core::{PagewrightError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Branch every site is published and served from.
pub const DEFAULT_BRANCH: &str = "main";

const COMMITTER_NAME: &str = "llm-bot";
const COMMITTER_EMAIL: &str = "llm-bot@aiexample.com";
const COMMIT_MESSAGE: &str = "Automated commit";

/// Publishes a working directory to a remote repository.
///
/// The bearer token is embedded in the remote URL for clone/push only; it is
/// stripped from every error message and never logged.
pub struct Publisher<E: GitExecutor> {
    executor: E,
    token: String,
}

impl<E: GitExecutor> Publisher<E> {
    pub fn new(executor: E, token: impl Into<String>) -> Self {
        Self {
            executor,
            token: token.into(),
        }
    }

    /// Clone the remote repository into `dir` (which must be empty).
    pub async fn clone_into(&self, repo_url: &str, dir: &Path) -> Result<()> {
        info!("Cloning {} for revision", repo_url);
        let auth_url = self.authenticated_url(repo_url);

        let output = self.executor.exec(dir, &["clone", &auth_url, "."]).await?;
        if !output.success {
            return Err(self.git_error("clone", &output));
        }
        Ok(())
    }

    /// Stage, commit (if anything changed) and force-push `dir` to the
    /// default branch of `repo_url`. Returns the resulting HEAD commit id.
    ///
    /// Works for both a fresh tree (initializes a repository) and a
    /// cloned-then-modified tree (reuses the existing one).
    pub async fn publish(&self, dir: &Path, repo_url: &str) -> Result<String> {
        if !dir.join(".git").is_dir() {
            self.run(dir, &["init"]).await?;
        }

        // Fixed committer identity, independent of host configuration
        self.run(dir, &["config", "user.email", COMMITTER_EMAIL])
            .await?;
        self.run(dir, &["config", "user.name", COMMITTER_NAME])
            .await?;

        self.run(dir, &["add", "."]).await?;

        let status = self.run(dir, &["status", "--porcelain"]).await?;
        if status.stdout.trim().is_empty() {
            debug!("No changes to commit; skipping commit");
        } else {
            self.run(dir, &["commit", "-m", COMMIT_MESSAGE]).await?;
        }

        let auth_url = self.authenticated_url(repo_url);
        let set_url = self
            .executor
            .exec(dir, &["remote", "set-url", "origin", &auth_url])
            .await?;
        if !set_url.success {
            self.run(dir, &["remote", "add", "origin", &auth_url])
                .await?;
        }

        self.run(dir, &["branch", "-M", DEFAULT_BRANCH]).await?;
        self.run(
            dir,
            &["push", "-u", "origin", DEFAULT_BRANCH, "--force"],
        )
        .await?;

        let head = self.run(dir, &["rev-parse", "HEAD"]).await?;
        let sha = head.stdout.trim().to_string();
        info!("Published {} at commit {}", repo_url, sha);
        Ok(sha)
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        let output = self.executor.exec(dir, args).await?;
        if !output.success {
            return Err(self.git_error(args[0], &output));
        }
        Ok(output)
    }

    fn authenticated_url(&self, repo_url: &str) -> String {
        repo_url.replacen("https://", &format!("https://{}@", self.token), 1)
    }

    /// Git writes the remote URL (token included) into some error messages;
    /// strip it before the text can reach a log line.
    fn git_error(&self, op: &str, output: &GitOutput) -> PagewrightError {
        let stderr = output.stderr.replace(&self.token, "***");
        PagewrightError::Git(format!("git {} failed: {}", op, stderr))
    }
}
