//! Reusable retry policy with exponential backoff

use std::time::Duration;

/// A bounded retry policy with exponential backoff.
///
/// Attempt 0 runs immediately; attempt k (k >= 1) is preceded by a delay of
/// `base * 2^(k-1)`. With the default 5 attempts and a 1-second base this
/// yields delays of 0, 1, 2, 4 and 8 seconds.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self { max_attempts, base }
    }

    /// Delay to wait before the given attempt (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            self.base * 2u32.pow(attempt - 1)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_schedule() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..policy.max_attempts)
            .map(|k| policy.delay_for(k).as_secs())
            .collect();
        assert_eq!(delays, vec![0, 1, 2, 4, 8]);
    }

    #[test]
    fn test_custom_base() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::ZERO);
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
    }
}
