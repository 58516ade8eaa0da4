//! Retry policy for transient stage failures.
//!
//! The policy is a plain value consulted by the dispatcher after a stage
//! job fails, instead of the executor re-dispatching itself from inside
//! its own failure branch. Keeps the retry semantics testable in isolation.

/// Maximum automatic attempts for one stage job (initial run + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before an automatic re-enqueue of a failed stage job.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 60;

/// What to do with a job that has just failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-enqueue the same job after `delay_secs`.
    Retry { delay_secs: u64 },
    /// Attempts exhausted. The failure is terminal.
    GiveUp,
}

/// Bounded fixed-delay retry policy.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_secs: u64,
}

impl RetryPolicy {
    /// Decide based on the job's post-failure `retry_count` (the count
    /// already includes the attempt that just failed).
    pub fn decide(&self, retry_count: u32) -> RetryDecision {
        if retry_count < self.max_attempts {
            RetryDecision::Retry {
                delay_secs: self.delay_secs,
            }
        } else {
            RetryDecision::GiveUp
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}
