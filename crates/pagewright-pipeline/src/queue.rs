//! Bounded task queue and worker pool
//!
//! Intake hands accepted tasks to a bounded channel feeding a fixed pool of
//! workers, so concurrent external-API load is capped by the worker count
//! rather than growing with request volume. Submission never blocks the
//! request handler: a full queue is reported to the caller instead.
//!
//! Tasks for the same id are not serialized. Two concurrent rounds can race
//! at the remote repository; the last force-push wins. This is an accepted
//! hazard, not something the queue prevents.

use crate::pipeline::TaskProcessor;
use pagewright_core::Task;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Why a submission was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The queue is at capacity
    Full,
    /// All workers have shut down
    Closed,
}

/// Sender half of the task queue, held by the intake endpoint.
#[derive(Clone)]
pub struct TaskQueue {
    sender: mpsc::Sender<Task>,
}

impl TaskQueue {
    /// Create a queue with the given capacity, returning the receiver to be
    /// handed to [`spawn_workers`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Task>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Enqueue a task without blocking.
    pub fn submit(&self, task: Task) -> Result<(), SubmitError> {
        self.sender.try_send(task).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

/// Spawn a fixed pool of workers draining the queue.
///
/// Each worker runs tasks to natural completion or first fatal error; there
/// is no cancellation once a task is picked up.
pub fn spawn_workers<P>(
    workers: usize,
    receiver: mpsc::Receiver<Task>,
    processor: Arc<P>,
) -> Vec<JoinHandle<()>>
where
    P: TaskProcessor + 'static,
{
    let receiver = Arc::new(Mutex::new(receiver));

    (0..workers)
        .map(|worker_id| {
            let receiver = receiver.clone();
            let processor = processor.clone();
            tokio::spawn(async move {
                loop {
                    let task = receiver.lock().await.recv().await;
                    let Some(task) = task else {
                        debug!("Worker {} shutting down: queue closed", worker_id);
                        break;
                    };
                    info!(
                        "Worker {} picked up task {} (round {})",
                        worker_id, task.task, task.round
                    );
                    processor.process(task).await;
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingProcessor {
        processed: AtomicU32,
    }

    #[async_trait]
    impl TaskProcessor for CountingProcessor {
        async fn process(&self, _task: Task) {
            self.processed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn task(id: &str) -> Task {
        Task {
            email: "a@b.c".to_string(),
            secret: "s".to_string(),
            task: id.to_string(),
            round: 1,
            nonce: "n".to_string(),
            brief: "b".to_string(),
            checks: vec![],
            evaluation_url: "https://e".to_string(),
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn test_workers_drain_queue() {
        let (queue, receiver) = TaskQueue::new(8);
        let processor = Arc::new(CountingProcessor {
            processed: AtomicU32::new(0),
        });
        let handles = spawn_workers(2, receiver, processor.clone());

        for i in 0..5 {
            queue.submit(task(&format!("t{}", i))).unwrap();
        }
        drop(queue);

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(processor.processed.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_submit_reports_full() {
        let (queue, _receiver) = TaskQueue::new(1);
        queue.submit(task("t1")).unwrap();
        assert_eq!(queue.submit(task("t2")), Err(SubmitError::Full));
    }

    #[tokio::test]
    async fn test_submit_reports_closed() {
        let (queue, receiver) = TaskQueue::new(1);
        drop(receiver);
        assert_eq!(queue.submit(task("t1")), Err(SubmitError::Closed));
    }
}
