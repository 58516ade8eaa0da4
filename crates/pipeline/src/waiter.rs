//! Bounded polling waiter for job completion.
//!
//! The sequencer executes each stage inline and then observes the job row
//! until it reaches a terminal state. The status is checked BEFORE each
//! sleep, so awaiting an already-terminal job returns immediately without
//! burning poll cycles.

use std::time::Duration;

use inkforge_core::lifecycle::job_state_machine;
use inkforge_core::types::DbId;
use inkforge_db::models::job::Job;
use inkforge_db::models::status::JobStatus;

use crate::store::{PipelineStore, StoreError};

/// How the wait ended.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The job reached `Done`; carries the terminal row.
    Done(Job),
    /// The job reached `Failed`; carries the terminal row.
    Failed(Job),
    /// The poll budget ran out with the job still non-terminal.
    TimedOut,
}

/// Polling parameters: fixed interval, bounded attempts.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_attempts: 10,
        }
    }
}

impl PollConfig {
    /// Poll the job until it is terminal or the attempt budget is spent.
    pub async fn await_completion(
        &self,
        store: &dyn PipelineStore,
        job_id: DbId,
    ) -> Result<WaitOutcome, StoreError> {
        for attempt in 0..self.max_attempts {
            let job = store.job(job_id).await?;

            if job_state_machine::is_terminal(job.status_id) {
                return Ok(if job.status_id == JobStatus::Done.id() {
                    WaitOutcome::Done(job)
                } else {
                    WaitOutcome::Failed(job)
                });
            }

            tracing::trace!(job_id, attempt, "Job not terminal yet, polling");

            // Sleep only between checks; the final miss times out at once.
            if attempt + 1 < self.max_attempts {
                tokio::time::sleep(Duration::from_millis(self.interval_ms)).await;
            }
        }

        Ok(WaitOutcome::TimedOut)
    }
}
