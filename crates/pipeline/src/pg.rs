//! Postgres-backed [`PipelineStore`] delegating to the `inkforge-db`
//! repositories.

use async_trait::async_trait;
use inkforge_core::types::DbId;
use inkforge_db::models::asset::{Asset, CreateAsset};
use inkforge_db::models::episode::Episode;
use inkforge_db::models::job::{CreateJob, Job};
use inkforge_db::models::project::Project;
use inkforge_db::models::status::StatusId;
use inkforge_db::repositories::{AssetRepo, EpisodeRepo, JobRepo, ProjectRepo};
use inkforge_db::DbPool;

use crate::store::{PipelineStore, StoreError};

/// Production store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PipelineStore for PgStore {
    async fn create_job(&self, input: &CreateJob) -> Result<Job, StoreError> {
        Ok(JobRepo::create(&self.pool, input).await?)
    }

    async fn job(&self, id: DbId) -> Result<Job, StoreError> {
        JobRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Job", id))
    }

    async fn claim_next_job(&self) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::claim_next(&self.pool).await?)
    }

    async fn mark_job_running(&self, id: DbId) -> Result<(), StoreError> {
        Ok(JobRepo::mark_running(&self.pool, id).await?)
    }

    async fn complete_job(
        &self,
        id: DbId,
        output: &serde_json::Value,
        cost_units: f64,
    ) -> Result<(), StoreError> {
        Ok(JobRepo::complete(&self.pool, id, output, cost_units).await?)
    }

    async fn fail_job(&self, id: DbId, error: &str) -> Result<i32, StoreError> {
        Ok(JobRepo::fail(&self.pool, id, error).await?)
    }

    async fn fail_job_terminal(&self, id: DbId, error: &str) -> Result<(), StoreError> {
        Ok(JobRepo::fail_terminal(&self.pool, id, error).await?)
    }

    async fn requeue_job(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(JobRepo::requeue(&self.pool, id).await?)
    }

    async fn requeue_job_auto(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(JobRepo::requeue_auto(&self.pool, id).await?)
    }

    async fn episode(&self, id: DbId) -> Result<Episode, StoreError> {
        EpisodeRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Episode", id))
    }

    async fn set_episode_status(&self, id: DbId, status: StatusId) -> Result<(), StoreError> {
        Ok(EpisodeRepo::set_status(&self.pool, id, status).await?)
    }

    async fn set_episode_script(&self, id: DbId, script_text: &str) -> Result<(), StoreError> {
        Ok(EpisodeRepo::set_script(&self.pool, id, script_text).await?)
    }

    async fn set_episode_storyboard(
        &self,
        id: DbId,
        storyboard: &serde_json::Value,
    ) -> Result<(), StoreError> {
        Ok(EpisodeRepo::set_storyboard(&self.pool, id, storyboard).await?)
    }

    async fn merge_episode_metadata(
        &self,
        id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), StoreError> {
        Ok(EpisodeRepo::merge_metadata(&self.pool, id, patch).await?)
    }

    async fn publish_episode(&self, id: DbId) -> Result<(), StoreError> {
        Ok(EpisodeRepo::publish(&self.pool, id).await?)
    }

    async fn unpublish_episode(&self, id: DbId) -> Result<(), StoreError> {
        Ok(EpisodeRepo::unpublish(&self.pool, id).await?)
    }

    async fn project(&self, id: DbId) -> Result<Project, StoreError> {
        ProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Project", id))
    }

    async fn create_asset(&self, input: &CreateAsset) -> Result<Asset, StoreError> {
        Ok(AssetRepo::create(&self.pool, input).await?)
    }

    async fn assets_by_kind(
        &self,
        episode_id: DbId,
        kind: &str,
    ) -> Result<Vec<Asset>, StoreError> {
        Ok(AssetRepo::list_by_kind(&self.pool, episode_id, kind).await?)
    }
}
