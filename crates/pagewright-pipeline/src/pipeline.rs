//! The task pipeline: intake to evaluator notification
//!
//! One pipeline drives both round flows. Round 1 builds a fresh site and
//! creates the remote repository; round >= 2 revises whatever is currently
//! published under the same task id. The two flows differ only in how the
//! workspace is sourced (fresh tree vs. clone) and which prompt is composed;
//! payload assembly and notification are shared.
//!
//! Failure policy: any generation, fetch, creation or publish error is
//! terminal for the attempt. It is logged with context and no notification
//! is sent; the evaluator detects the omission on its own side. Retries
//! exist only inside the notifier.

use crate::notifier::{Notifier, NotifyTransport};
use crate::workspace::TaskWorkspace;
use async_trait::async_trait;
use pagewright_core::{AppConfig, NotificationPayload, PublishResult, Result, Task};
use pagewright_gen::{build_initial_prompt, build_revision_prompt, starts_with_doctype, Generator};
use pagewright_publish::{GitExecutor, Publisher, RepoHost, DEFAULT_BRANCH};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The single generated markup file constituting the deployed site.
pub const INDEX_FILE: &str = "index.html";

/// Trait for processing accepted tasks (allows the worker pool to be tested
/// without a full pipeline)
#[async_trait]
pub trait TaskProcessor: Send + Sync {
    /// Run a task to completion or to its first fatal error.
    ///
    /// Invoked exactly once per accepted task, off the request path. Errors
    /// never surface to the intake caller.
    async fn process(&self, task: Task);
}

/// The background pipeline for a single task.
pub struct TaskPipeline<G, H, E, N>
where
    G: Generator,
    H: RepoHost,
    E: GitExecutor,
    N: NotifyTransport,
{
    config: Arc<AppConfig>,
    generator: G,
    host: H,
    publisher: Publisher<E>,
    notifier: Notifier<N>,
}

impl<G, H, E, N> TaskPipeline<G, H, E, N>
where
    G: Generator,
    H: RepoHost,
    E: GitExecutor,
    N: NotifyTransport,
{
    pub fn new(
        config: Arc<AppConfig>,
        generator: G,
        host: H,
        publisher: Publisher<E>,
        notifier: Notifier<N>,
    ) -> Self {
        Self {
            config,
            generator,
            host,
            publisher,
            notifier,
        }
    }

    async fn run(&self, task: &Task) -> Result<()> {
        // Scoped workspace, removed on drop including error paths
        let workspace = TaskWorkspace::create()?;

        let publish = if task.is_revision() {
            info!("Task {} round {}: revision flow", task.task, task.round);
            self.revise(task, &workspace).await?
        } else {
            info!("Task {} round {}: build flow", task.task, task.round);
            self.build(task, &workspace).await?
        };

        let payload = NotificationPayload::from_publish(task, &publish);
        info!(
            "Notifying evaluator at {} for task {} (commit {})",
            task.evaluation_url, task.task, payload.commit_sha
        );
        if !self.notifier.notify(&task.evaluation_url, &payload).await {
            warn!(
                "Evaluator was not notified for task {} round {}",
                task.task, task.round
            );
        }

        Ok(())
    }

    /// Round 1: generate a fresh site and create its repository.
    async fn build(&self, task: &Task, workspace: &TaskWorkspace) -> Result<PublishResult> {
        let prompt =
            build_initial_prompt(&task.brief, &task.checks, &task.attachment_names());
        let document = self.generator.generate(&prompt).await?;
        check_doctype(task, &document);

        workspace.write(INDEX_FILE, &document)?;
        workspace.write(
            "README.md",
            &pagewright_gen::generate_readme(&task.brief, &task.checks, &task.task),
        )?;
        workspace.write(
            "LICENSE",
            &pagewright_gen::generate_license(&self.config.author),
        )?;

        let repo_url = self.host.create_remote(&task.task, &task.brief).await?;
        self.publish_workspace(task, workspace, repo_url).await
    }

    /// Round >= 2: revise the currently published site in a clone.
    async fn revise(&self, task: &Task, workspace: &TaskWorkspace) -> Result<PublishResult> {
        let existing = self
            .host
            .fetch_file(&task.task, INDEX_FILE, DEFAULT_BRANCH)
            .await?;

        let prompt = build_revision_prompt(&existing, &task.brief, &task.checks);
        let document = self.generator.generate(&prompt).await?;
        check_doctype(task, &document);

        let repo_url = self.config.repo_url(&task.task);
        // Reuse the clone as the git working tree; only the primary document
        // is overwritten, README and LICENSE stay as published.
        self.publisher.clone_into(&repo_url, workspace.path()).await?;
        workspace.write(INDEX_FILE, &document)?;

        self.publish_workspace(task, workspace, repo_url).await
    }

    async fn publish_workspace(
        &self,
        task: &Task,
        workspace: &TaskWorkspace,
        repo_url: String,
    ) -> Result<PublishResult> {
        let commit_sha = self.publisher.publish(workspace.path(), &repo_url).await?;

        let pages_enabled = self.host.enable_pages(&task.task, DEFAULT_BRANCH).await;
        if !pages_enabled {
            warn!("Pages not enabled for {}; continuing", task.task);
        }

        Ok(PublishResult {
            commit_sha,
            repo_url,
            pages_url: self.config.pages_url(&task.task),
            pages_enabled,
        })
    }
}

#[async_trait]
impl<G, H, E, N> TaskProcessor for TaskPipeline<G, H, E, N>
where
    G: Generator,
    H: RepoHost,
    E: GitExecutor,
    N: NotifyTransport,
{
    async fn process(&self, task: Task) {
        if let Err(e) = self.run(&task).await {
            // Terminal for this attempt: no notification, no re-enqueue
            error!(
                "Task {} round {} aborted: {}",
                task.task, task.round, e
            );
        }
    }
}

fn check_doctype(task: &Task, document: &str) {
    if !starts_with_doctype(document) {
        warn!(
            "Generated document for task {} does not start with <!DOCTYPE html>",
            task.task
        );
    }
}
