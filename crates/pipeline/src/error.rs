use inkforge_core::types::DbId;

use crate::store::StoreError;

/// Errors raised past the orchestrator boundary.
///
/// Transient engine failures are NOT represented here; the executor
/// absorbs those into the job's failed state and the retry policy. What
/// escapes is what the hosting infrastructure needs to log and alert on.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error("Job {job_id} has unknown type '{job_type}'")]
    UnknownJobType { job_id: DbId, job_type: String },

    #[error("Job {0} has no episode")]
    MissingEpisode(DbId),

    /// A child stage reached terminal `Failed`, aborting the pipeline.
    #[error("{stage} generation failed: {message}")]
    StageFailed {
        stage: &'static str,
        message: String,
    },

    /// A child stage did not reach a terminal state within the poll budget.
    #[error("{stage} generation timeout: job {job_id} not terminal within poll budget")]
    StageTimeout { stage: &'static str, job_id: DbId },

    /// The whole five-stage run exceeded the pipeline wall-clock budget.
    #[error("Full pipeline timeout after {0}s")]
    PipelineTimeout(u64),
}
