//! Axum intake endpoint
//!
//! The intake boundary does the minimum on the request path: verify the
//! shared secret, enqueue the task, answer immediately. All real work happens
//! in the background worker pool; a task is never awaited here.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use pagewright_core::{AppConfig, Task};
use pagewright_pipeline::{SubmitError, TaskQueue};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub queue: TaskQueue,
}

pub type SharedState = Arc<AppState>;

/// Response body for an accepted task
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub task: String,
    pub round: u32,
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api-endpoint", post(receive_task))
        .with_state(state)
}

/// Serve the intake endpoint until the process exits.
pub async fn serve(state: SharedState, addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET / - health check
async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Pagewright deployment API is running!",
        "email": state.config.email,
        "status": "ready",
    }))
}

/// POST /api-endpoint - task intake
///
/// Must answer within seconds: the secret check and the enqueue are the only
/// work done before returning 200.
async fn receive_task(
    State(state): State<SharedState>,
    Json(task): Json<Task>,
) -> axum::response::Response {
    if task.secret != state.config.shared_secret {
        warn!("Rejected task {}: invalid secret", task.task);
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "Invalid secret" })),
        )
            .into_response();
    }

    info!("Received valid task: {} (round {})", task.task, task.round);

    let accepted = AcceptedResponse {
        status: "accepted",
        message: "Task received and processing started",
        task: task.task.clone(),
        round: task.round,
    };

    match state.queue.submit(task) {
        Ok(()) => (StatusCode::OK, Json(accepted)).into_response(),
        Err(SubmitError::Full) => {
            warn!("Task queue full; rejecting {}", accepted.task);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "detail": "Queue full, retry later" })),
            )
                .into_response()
        }
        Err(SubmitError::Closed) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "detail": "Service shutting down" })),
        )
            .into_response(),
    }
}
