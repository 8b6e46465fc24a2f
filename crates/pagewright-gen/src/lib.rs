//! # pagewright-gen
//!
//! Document generation for Pagewright: prompt composition, the
//! chat-completions client, and the static scaffold files that accompany a
//! round-1 deployment.
//!
//! Each generation call is a single-turn exchange; the pipeline owns all
//! state between rounds (the published repository is the only memory).

mod client;
mod prompt;
mod scaffold;
mod types;

pub use client::{ChatClient, Generator, MockGenerator};
pub use prompt::{build_initial_prompt, build_revision_prompt, starts_with_doctype, DOCTYPE};
pub use scaffold::{generate_license, generate_readme};
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
