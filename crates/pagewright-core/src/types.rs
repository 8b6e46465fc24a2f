//! Task and result types shared across the Pagewright pipeline

use serde::{Deserialize, Serialize};

/// A named file attachment supplied with a task.
///
/// Attachments are never fetched or embedded by the pipeline; their names are
/// passed through as prompt context only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// A single "build or revise a static site" task.
///
/// Constructed at intake, moved by value into the background pipeline, never
/// mutated in place, and discarded once the pipeline completes or fails.
/// There is no persistence: task state is not recoverable across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Requester email, echoed back in the evaluator notification
    pub email: String,
    /// Shared secret checked at intake before the task is accepted
    pub secret: String,
    /// Task identifier; doubles as the published repository name and is
    /// stable across rounds for the same deployed artifact
    pub task: String,
    /// Round number: 1 = initial build, >= 2 = revision
    pub round: u32,
    /// Caller-supplied idempotency/correlation token
    pub nonce: String,
    /// Natural-language description of the desired site behavior
    pub brief: String,
    /// Machine-verifiable requirement strings, in evaluator order
    pub checks: Vec<String>,
    /// Evaluator callback URL for the result notification
    pub evaluation_url: String,
    /// Attachment references (names only reach the prompt)
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Task {
    /// Whether this round revises an existing deployment.
    ///
    /// Rounds beyond 2 are treated identically to round 2: always revise
    /// against whatever is currently published.
    pub fn is_revision(&self) -> bool {
        self.round >= 2
    }

    /// Attachment names in input order, for prompt context.
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Outcome of a successful repository publish.
///
/// Produced exactly once per publish and folded into the notification payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    pub commit_sha: String,
    pub repo_url: String,
    pub pages_url: String,
    pub pages_enabled: bool,
}

/// JSON payload delivered to the evaluator callback.
///
/// Built once per task attempt and resent byte-identical on every retry so
/// the evaluator can deduplicate on the nonce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub email: String,
    pub task: String,
    pub round: u32,
    pub nonce: String,
    pub repo_url: String,
    pub commit_sha: String,
    pub pages_url: String,
}

impl NotificationPayload {
    /// Assemble the payload from a task and its publish result.
    pub fn from_publish(task: &Task, publish: &PublishResult) -> Self {
        Self {
            email: task.email.clone(),
            task: task.task.clone(),
            round: task.round,
            nonce: task.nonce.clone(),
            repo_url: publish.repo_url.clone(),
            commit_sha: publish.commit_sha.clone(),
            pages_url: publish.pages_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(round: u32) -> Task {
        Task {
            email: "student@example.com".to_string(),
            secret: "s3cret".to_string(),
            task: "counter-app-abc123".to_string(),
            round,
            nonce: "nonce-1".to_string(),
            brief: "Build a counter app".to_string(),
            checks: vec!["counter increments on click".to_string()],
            evaluation_url: "https://evaluator.example.com/notify".to_string(),
            attachments: vec![],
        }
    }

    #[test]
    fn test_round_dispatch() {
        assert!(!sample_task(1).is_revision());
        assert!(sample_task(2).is_revision());
        // Rounds beyond 2 fall through to the revision path
        assert!(sample_task(7).is_revision());
    }

    #[test]
    fn test_task_deserializes_without_attachments() {
        let json = r#"{
            "email": "a@b.c",
            "secret": "x",
            "task": "t",
            "round": 1,
            "nonce": "n",
            "brief": "b",
            "checks": [],
            "evaluation_url": "https://e"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.attachments.is_empty());
    }

    #[test]
    fn test_payload_from_publish() {
        let task = sample_task(2);
        let publish = PublishResult {
            commit_sha: "deadbeef".to_string(),
            repo_url: "https://github.com/u/counter-app-abc123".to_string(),
            pages_url: "https://u.github.io/counter-app-abc123/".to_string(),
            pages_enabled: true,
        };

        let payload = NotificationPayload::from_publish(&task, &publish);
        assert_eq!(payload.task, "counter-app-abc123");
        assert_eq!(payload.round, 2);
        assert_eq!(payload.nonce, "nonce-1");
        assert_eq!(payload.commit_sha, "deadbeef");

        // Retries must resend the identical payload
        let again = NotificationPayload::from_publish(&task, &publish);
        assert_eq!(payload, again);
    }
}
