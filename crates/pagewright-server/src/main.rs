//! Pagewright server binary
//!
//! Loads configuration from the environment once, wires the real clients
//! into the pipeline, spawns the worker pool, and serves the intake
//! endpoint.

mod server;

use anyhow::Context;
use clap::Parser;
use pagewright_core::AppConfig;
use pagewright_gen::ChatClient;
use pagewright_pipeline::{
    spawn_workers, HttpNotifyTransport, Notifier, TaskPipeline, TaskQueue,
};
use pagewright_publish::{GitCommand, GitHubClient, Publisher};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(about = "LLM-driven static-site build and deploy pipeline")]
struct Cli {
    /// Address to bind the intake endpoint to
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: String,

    /// Number of background workers
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Task queue capacity
    #[arg(long, default_value_t = 64)]
    queue_capacity: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = Arc::new(AppConfig::from_env().context("Invalid configuration")?);
    info!("Configured for {} ({})", config.email, config.github_username);

    let pipeline = Arc::new(TaskPipeline::new(
        config.clone(),
        ChatClient::new(&config),
        GitHubClient::new(&config),
        Publisher::new(GitCommand, config.github_token.clone()),
        Notifier::new(HttpNotifyTransport::default()),
    ));

    let (queue, receiver) = TaskQueue::new(cli.queue_capacity);
    let workers = spawn_workers(cli.workers, receiver, pipeline);
    info!("Spawned {} workers", workers.len());

    let state = Arc::new(server::AppState { config, queue });
    server::serve(state, &cli.addr).await
}
