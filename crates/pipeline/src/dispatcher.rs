//! Worker dispatch loop.
//!
//! Claims queued jobs one at a time (the claim query uses
//! `FOR UPDATE SKIP LOCKED`, so multiple worker processes are safe) and
//! routes them by `job_type`: stage jobs to the executor, `pipeline.full`
//! to the sequencer. Delayed retry re-enqueues are spawned as detached
//! tasks so the loop keeps draining the queue.

use std::sync::Arc;
use std::time::Duration;

use inkforge_core::stage;
use inkforge_core::types::DbId;
use inkforge_db::models::job::Job;

use crate::error::PipelineError;
use crate::executor::{ExecutionOutcome, StageExecutor};
use crate::sequencer::PipelineSequencer;
use crate::store::PipelineStore;

/// Queue poll interval when no job is available.
const IDLE_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct Dispatcher {
    store: Arc<dyn PipelineStore>,
    executor: StageExecutor,
    sequencer: PipelineSequencer,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn PipelineStore>,
        executor: StageExecutor,
        sequencer: PipelineSequencer,
    ) -> Self {
        Self {
            store,
            executor,
            sequencer,
        }
    }

    /// Drain the queue forever. Job-level failures are logged and the loop
    /// moves on; only the process supervisor stops it.
    pub async fn run(&self) {
        tracing::info!("Dispatcher started");
        loop {
            match self.store.claim_next_job().await {
                Ok(Some(job)) => {
                    let job_id = job.id;
                    let job_type = job.job_type.clone();
                    if let Err(err) = self.process(job).await {
                        tracing::error!(job_id, job_type, error = %err, "Job processing failed");
                    }
                }
                Ok(None) => tokio::time::sleep(IDLE_POLL_INTERVAL).await,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to claim next job");
                    tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                }
            }
        }
    }

    /// Process one claimed job to a terminal state.
    pub async fn process(&self, job: Job) -> Result<(), PipelineError> {
        if job.job_type == stage::JOB_TYPE_PIPELINE_FULL {
            return self.process_pipeline(job).await;
        }

        match self.executor.execute(job.id).await {
            Ok(ExecutionOutcome::Retry { delay_secs }) => {
                self.schedule_requeue(job.id, delay_secs);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(err) => {
                // Infrastructure error mid-run: the row must not stay Running.
                self.executor
                    .fail_terminally(job.id, job.episode_id, &err.to_string())
                    .await?;
                Err(err)
            }
        }
    }

    /// Run the sequencer under the pipeline wall-clock budget.
    async fn process_pipeline(&self, job: Job) -> Result<(), PipelineError> {
        let budget = Duration::from_secs(stage::PIPELINE_TIMEOUT_SECS);
        match tokio::time::timeout(budget, self.sequencer.run(job.id)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                let err = PipelineError::PipelineTimeout(stage::PIPELINE_TIMEOUT_SECS);
                self.executor
                    .fail_terminally(job.id, job.episode_id, &err.to_string())
                    .await?;
                Err(err)
            }
        }
    }

    /// Re-enqueue a failed job after its retry delay, off the dispatch loop.
    fn schedule_requeue(&self, job_id: DbId, delay_secs: u64) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            match store.requeue_job_auto(job_id).await {
                Ok(true) => tracing::info!(job_id, "Job re-enqueued for retry"),
                Ok(false) => {
                    tracing::warn!(job_id, "Job no longer failed, skipping retry re-enqueue")
                }
                Err(err) => tracing::error!(job_id, error = %err, "Retry re-enqueue failed"),
            }
        });
    }
}
