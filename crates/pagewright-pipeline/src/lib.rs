//! # pagewright-pipeline
//!
//! The background task-processing pipeline for Pagewright.
//!
//! A task accepted at intake flows through here:
//!
//! 1. Round dispatch: round 1 builds a fresh site, round >= 2 revises the
//!    currently published one
//! 2. Prompt composition and document generation
//! 3. Materialization into a scoped temporary workspace
//! 4. Idempotent repository publishing and pages activation
//! 5. At-least-once evaluator notification with bounded retry/backoff
//!
//! The pipeline is fire-and-forget from the intake caller's perspective:
//! failures are logged, never raised back, and reach the evaluator only as
//! omission.

mod notifier;
mod pipeline;
mod queue;
mod retry;
mod workspace;

pub use notifier::{HttpNotifyTransport, Notifier, NotifyTransport};
pub use pipeline::{TaskPipeline, TaskProcessor, INDEX_FILE};
pub use queue::{spawn_workers, SubmitError, TaskQueue};
pub use retry::RetryPolicy;
pub use workspace::TaskWorkspace;
