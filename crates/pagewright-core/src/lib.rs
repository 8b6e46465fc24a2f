//! # pagewright-core
//!
//! Core types for the Pagewright deployment pipeline.
//!
//! Pagewright accepts "build or revise a static site" tasks, delegates code
//! generation to a language model, publishes the result as a GitHub Pages
//! site, and reports the outcome to an external evaluator.
//!
//! This crate holds what every other crate shares:
//!
//! - The task and notification data model
//! - The unified error type
//! - Process-wide configuration, loaded once at startup

mod config;
mod error;
mod types;

pub use config::{AppConfig, DEFAULT_CHAT_URL, DEFAULT_GITHUB_API_URL, DEFAULT_MODEL};
pub use error::{PagewrightError, Result};
pub use types::{Attachment, NotificationPayload, PublishResult, Task};
