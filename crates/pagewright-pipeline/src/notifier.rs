//! At-least-once evaluator notification with bounded retry
//!
//! Success is strictly an HTTP 200. Any other status or a transport error
//! counts as a failed attempt and is retried with exponential backoff; after
//! the final attempt the failure is logged and reported as `false`. There is
//! no further escalation path.

use crate::retry::RetryPolicy;
use async_trait::async_trait;
use pagewright_core::{NotificationPayload, PagewrightError, Result};
use std::time::Duration;
use tracing::{error, info, warn};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for delivering the notification payload (allows mocking in tests)
#[async_trait]
pub trait NotifyTransport: Send + Sync {
    /// POST the payload as JSON and return the response status code.
    async fn post_json(&self, url: &str, payload: &NotificationPayload) -> Result<u16>;
}

/// Real HTTP transport
#[derive(Debug, Clone, Default)]
pub struct HttpNotifyTransport {
    client: reqwest::Client,
}

#[async_trait]
impl NotifyTransport for HttpNotifyTransport {
    async fn post_json(&self, url: &str, payload: &NotificationPayload) -> Result<u16> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .timeout(NOTIFY_TIMEOUT)
            .send()
            .await
            .map_err(|e| PagewrightError::Notify(format!("Request failed: {}", e)))?;
        Ok(response.status().as_u16())
    }
}

/// Delivers a result payload to the evaluator callback URL.
pub struct Notifier<T: NotifyTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: NotifyTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Deliver the payload, retrying per the policy.
    ///
    /// The identical payload is resent on every attempt so the evaluator can
    /// deduplicate on the nonce.
    pub async fn notify(&self, url: &str, payload: &NotificationPayload) -> bool {
        for attempt in 0..self.policy.max_attempts {
            let delay = self.policy.delay_for(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.transport.post_json(url, payload).await {
                Ok(200) => {
                    info!(
                        "Notified evaluator for task {} (attempt {})",
                        payload.task,
                        attempt + 1
                    );
                    return true;
                }
                Ok(status) => {
                    warn!(
                        "Evaluator returned status {} (attempt {}/{})",
                        status,
                        attempt + 1,
                        self.policy.max_attempts
                    );
                }
                Err(e) => {
                    warn!(
                        "Notify attempt {}/{} failed: {}",
                        attempt + 1,
                        self.policy.max_attempts,
                        e
                    );
                }
            }
        }

        error!(
            "Failed to notify evaluator for task {} after {} attempts",
            payload.task, self.policy.max_attempts
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Transport that walks a scripted list of statuses, repeating the last.
    struct ScriptedTransport {
        statuses: Vec<Option<u16>>,
        attempts: Arc<AtomicU32>,
    }

    impl ScriptedTransport {
        fn new(statuses: Vec<Option<u16>>) -> (Self, Arc<AtomicU32>) {
            let attempts = Arc::new(AtomicU32::new(0));
            (
                Self {
                    statuses,
                    attempts: attempts.clone(),
                },
                attempts,
            )
        }
    }

    #[async_trait]
    impl NotifyTransport for ScriptedTransport {
        async fn post_json(&self, _url: &str, _payload: &NotificationPayload) -> Result<u16> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst) as usize;
            let slot = self
                .statuses
                .get(n)
                .or_else(|| self.statuses.last())
                .copied()
                .flatten();
            slot.ok_or_else(|| PagewrightError::Notify("connection refused".to_string()))
        }
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            email: "a@b.c".to_string(),
            task: "demo".to_string(),
            round: 1,
            nonce: "n".to_string(),
            repo_url: "https://github.com/u/demo".to_string(),
            commit_sha: "abc".to_string(),
            pages_url: "https://u.github.io/demo/".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_five_attempts_against_500() {
        let (transport, attempts) = ScriptedTransport::new(vec![Some(500)]);
        let notifier = Notifier::new(transport);

        let started = tokio::time::Instant::now();
        let ok = notifier.notify("https://evaluator", &payload()).await;

        assert!(!ok);
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
        // Backoff schedule 0 + 1 + 2 + 4 + 8 seconds
        assert_eq!(started.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt() {
        let (transport, attempts) =
            ScriptedTransport::new(vec![Some(500), Some(502), Some(200)]);
        let notifier = Notifier::new(transport);

        let ok = notifier.notify("https://evaluator", &payload()).await;

        assert!(ok);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_are_retried_not_escalated() {
        let (transport, attempts) = ScriptedTransport::new(vec![None, Some(200)]);
        let notifier = Notifier::new(transport);

        let ok = notifier.notify("https://evaluator", &payload()).await;

        assert!(ok);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_200_success_statuses_are_failures() {
        let (transport, attempts) = ScriptedTransport::new(vec![Some(201)]);
        let notifier = Notifier::new(transport);

        assert!(!notifier.notify("https://evaluator", &payload()).await);
        assert_eq!(attempts.load(Ordering::SeqCst), 5);
    }
}
