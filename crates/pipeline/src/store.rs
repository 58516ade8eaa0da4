//! Persistence seam for the orchestrator.
//!
//! The executor, sequencer, waiter and projector talk to this trait instead
//! of `sqlx` directly, so their state-machine logic runs against an
//! in-memory store in tests. [`crate::pg::PgStore`] is the production
//! implementation, delegating to the `inkforge-db` repositories.

use async_trait::async_trait;
use inkforge_core::types::DbId;
use inkforge_db::models::asset::{Asset, CreateAsset};
use inkforge_db::models::episode::Episode;
use inkforge_db::models::job::{CreateJob, Job};
use inkforge_db::models::project::Project;
use inkforge_db::models::status::StatusId;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}

/// All reads and writes the orchestrator performs.
///
/// Fetchers return [`StoreError::NotFound`] rather than `Option`: a
/// missing row at orchestration time is always an error condition.
#[async_trait]
pub trait PipelineStore: Send + Sync {
    // -- Jobs --

    async fn create_job(&self, input: &CreateJob) -> Result<Job, StoreError>;

    async fn job(&self, id: DbId) -> Result<Job, StoreError>;

    /// Atomically claim the oldest queued job, moving it to `Running`.
    async fn claim_next_job(&self) -> Result<Option<Job>, StoreError>;

    async fn mark_job_running(&self, id: DbId) -> Result<(), StoreError>;

    /// Mark `Done`, store the output payload and accumulate cost.
    async fn complete_job(
        &self,
        id: DbId,
        output: &serde_json::Value,
        cost_units: f64,
    ) -> Result<(), StoreError>;

    /// Mark `Failed` with the error message and bump `retry_count`.
    /// Returns the post-increment count.
    async fn fail_job(&self, id: DbId, error: &str) -> Result<i32, StoreError>;

    /// Mark `Failed` without touching `retry_count`. Used for precondition
    /// failures and for the terminal failure handler.
    async fn fail_job_terminal(&self, id: DbId, error: &str) -> Result<(), StoreError>;

    /// Manual retry: failed job back to `Queued` with its error cleared and
    /// `retry_count` preserved. Returns `false` if the job was not `Failed`.
    async fn requeue_job(&self, id: DbId) -> Result<bool, StoreError>;

    /// Automatic retry re-enqueue: back to `Queued` keeping both the error
    /// message and `retry_count`.
    async fn requeue_job_auto(&self, id: DbId) -> Result<bool, StoreError>;

    // -- Episodes --

    async fn episode(&self, id: DbId) -> Result<Episode, StoreError>;

    async fn set_episode_status(&self, id: DbId, status: StatusId) -> Result<(), StoreError>;

    async fn set_episode_script(&self, id: DbId, script_text: &str) -> Result<(), StoreError>;

    async fn set_episode_storyboard(
        &self,
        id: DbId,
        storyboard: &serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Shallow-merge a patch into `generation_metadata`.
    async fn merge_episode_metadata(
        &self,
        id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Move to `Published` and stamp `published_at`.
    async fn publish_episode(&self, id: DbId) -> Result<(), StoreError>;

    /// Back to `Done` with `published_at` cleared.
    async fn unpublish_episode(&self, id: DbId) -> Result<(), StoreError>;

    // -- Projects --

    async fn project(&self, id: DbId) -> Result<Project, StoreError>;

    // -- Assets --

    async fn create_asset(&self, input: &CreateAsset) -> Result<Asset, StoreError>;

    /// An episode's assets of one kind, in insertion order.
    async fn assets_by_kind(&self, episode_id: DbId, kind: &str)
        -> Result<Vec<Asset>, StoreError>;
}
