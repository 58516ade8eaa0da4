//! Full five-stage pipeline run under one umbrella job.
//!
//! The sequencer creates a child job per stage, executes it inline, then
//! observes it through the polling waiter before moving on. Any abort
//! (a failed stage, a poll timeout, an infrastructure error) marks the
//! umbrella job and the episode `Failed`, publishes `pipeline.failed`,
//! and re-raises the error to the caller.

use std::sync::Arc;

use inkforge_core::stage::{self, Stage};
use inkforge_core::types::DbId;
use inkforge_db::models::job::CreateJob;
use inkforge_db::models::status::JobStatus;
use inkforge_events::{DomainEvent, EventBus, PIPELINE_COMPLETED, PIPELINE_FAILED};
use serde_json::json;

use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::projector::EpisodeProjector;
use crate::store::PipelineStore;
use crate::waiter::{PollConfig, WaitOutcome};

pub struct PipelineSequencer {
    store: Arc<dyn PipelineStore>,
    executor: StageExecutor,
    projector: EpisodeProjector,
    poll: PollConfig,
    events: Arc<EventBus>,
}

impl PipelineSequencer {
    pub fn new(
        store: Arc<dyn PipelineStore>,
        executor: StageExecutor,
        projector: EpisodeProjector,
        poll: PollConfig,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            store,
            executor,
            projector,
            poll,
            events,
        }
    }

    /// Run all five stages for the umbrella job's episode.
    pub async fn run(&self, umbrella_job_id: DbId) -> Result<(), PipelineError> {
        match self.run_inner(umbrella_job_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.record_failure(umbrella_job_id, &err.to_string()).await;
                Err(err)
            }
        }
    }

    async fn run_inner(&self, umbrella_job_id: DbId) -> Result<(), PipelineError> {
        let umbrella = self.store.job(umbrella_job_id).await?;
        if umbrella.job_type != stage::JOB_TYPE_PIPELINE_FULL {
            return Err(PipelineError::UnknownJobType {
                job_id: umbrella_job_id,
                job_type: umbrella.job_type,
            });
        }
        let episode_id = umbrella
            .episode_id
            .ok_or(PipelineError::MissingEpisode(umbrella_job_id))?;

        // Already `Running` when the job arrived through the claim query.
        if umbrella.status_id != JobStatus::Running.id() {
            self.store.mark_job_running(umbrella_job_id).await?;
        }
        self.projector.project_running(episode_id).await?;
        tracing::info!(umbrella_job_id, episode_id, "Full pipeline started");

        // Per-stage parameters are inherited from the umbrella job.
        let child_input = json!({
            "keywords": umbrella.input.get("keywords").cloned().unwrap_or_else(|| json!([])),
            "target_panels": umbrella
                .input
                .get("target_panels")
                .cloned()
                .unwrap_or_else(|| json!(stage::DEFAULT_TARGET_PANELS)),
        });

        let mut completed: Vec<(Stage, DbId)> = Vec::with_capacity(stage::PIPELINE_ORDER.len());
        let mut total_cost = 0.0_f64;

        for pipeline_stage in stage::PIPELINE_ORDER {
            let child = self
                .store
                .create_job(&CreateJob {
                    episode_id: Some(episode_id),
                    job_type: pipeline_stage.job_type().to_string(),
                    input: child_input.clone(),
                })
                .await?;

            // Engine failures are absorbed into the child's job row; only
            // infrastructure errors escape here. The waiter below reads the
            // terminal state either way.
            if let Err(err) = self.executor.execute(child.id).await {
                // Best effort: the child must not stay `Running` when the
                // executor bails out mid-stage.
                if let Err(mark_err) = self
                    .executor
                    .fail_terminally(child.id, Some(episode_id), &err.to_string())
                    .await
                {
                    tracing::error!(
                        child_job_id = child.id,
                        error = %mark_err,
                        "Could not record stage failure on child job"
                    );
                }
                return Err(err);
            }

            match self
                .poll
                .await_completion(self.store.as_ref(), child.id)
                .await?
            {
                WaitOutcome::Done(job) => {
                    total_cost += job.cost_units;
                    completed.push((pipeline_stage, child.id));
                }
                WaitOutcome::Failed(job) => {
                    return Err(PipelineError::StageFailed {
                        stage: pipeline_stage.display_name(),
                        message: job
                            .error_message
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    });
                }
                WaitOutcome::TimedOut => {
                    return Err(PipelineError::StageTimeout {
                        stage: pipeline_stage.display_name(),
                        job_id: child.id,
                    });
                }
            }
        }

        let mut stage_jobs = serde_json::Map::new();
        for (pipeline_stage, job_id) in &completed {
            stage_jobs.insert(pipeline_stage.job_type().to_string(), json!(job_id));
        }
        let output = json!({
            "stage_jobs": stage_jobs,
            "completed_steps": completed.len(),
            "total_cost_units": total_cost,
        });

        self.store
            .complete_job(umbrella_job_id, &output, total_cost)
            .await?;
        self.projector.project_done(episode_id).await?;

        tracing::info!(
            umbrella_job_id,
            episode_id,
            total_cost_units = total_cost,
            "Full pipeline completed"
        );
        self.events.publish(
            DomainEvent::new(PIPELINE_COMPLETED)
                .with_episode(episode_id)
                .with_payload(json!({ "total_cost_units": total_cost })),
        );

        Ok(())
    }

    /// Best-effort abort bookkeeping: the umbrella and the episode both end
    /// `Failed` even when the failing child already recorded its own state.
    async fn record_failure(&self, umbrella_job_id: DbId, message: &str) {
        tracing::error!(umbrella_job_id, %message, "Full pipeline failed");

        if let Err(err) = self
            .store
            .fail_job_terminal(umbrella_job_id, message)
            .await
        {
            tracing::error!(
                umbrella_job_id,
                error = %err,
                "Could not record pipeline failure on umbrella job"
            );
        }

        let episode_id = match self.store.job(umbrella_job_id).await {
            Ok(job) => job.episode_id,
            Err(_) => None,
        };
        if let Some(episode_id) = episode_id {
            if let Err(err) = self.projector.project_failed(episode_id).await {
                tracing::error!(
                    episode_id,
                    error = %err,
                    "Could not project pipeline failure onto episode"
                );
            }
            self.events.publish(
                DomainEvent::new(PIPELINE_FAILED)
                    .with_episode(episode_id)
                    .with_payload(json!({ "error": message })),
            );
        }
    }
}
