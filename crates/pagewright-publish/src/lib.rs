//! # pagewright-publish
//!
//! Repository publishing for Pagewright.
//!
//! This crate owns every interaction with the hosting provider:
//! - Git transport (clone, commit, force-push) through the [`GitExecutor`]
//!   abstraction, driving the `git` binary
//! - The GitHub REST API: idempotent repository creation, file fetch for
//!   revisions, and pages activation
//!
//! Publishing is idempotent at the content level: the default branch is
//! force-pushed to match the working tree, and no commit is created when
//! nothing changed.

mod command;
mod hosting;
mod publisher;

pub use command::{GitCommand, GitExecutor, GitOutput, MockGitExecutor};
pub use hosting::{create_status_ok, pages_status_enabled, GitHubClient, RepoHost};
pub use publisher::{Publisher, DEFAULT_BRANCH};
