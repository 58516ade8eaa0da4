//! Repository for the `episode_jobs` table.
//!
//! Uses `JobStatus` from `models::status` for all status transitions.
//! No magic numbers: every status literal is a named constant.

use inkforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job};
use crate::models::status::JobStatus;

/// Column list for `episode_jobs` queries.
const COLUMNS: &str = "\
    id, episode_id, job_type, status_id, input, output, error_message, \
    cost_units, retry_count, started_at, completed_at, \
    created_at, updated_at";

/// Provides CRUD and state-transition operations for generation jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new queued job.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO episode_jobs (episode_id, job_type, status_id, input) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(input.episode_id)
            .bind(&input.job_type)
            .bind(JobStatus::Queued.id())
            .bind(&input.input)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episode_jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest queued job for execution.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` so concurrent worker processes
    /// never double-claim the same row. The claimed job moves to `Running`
    /// with `started_at` stamped.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE episode_jobs \
             SET status_id = $1, started_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM episode_jobs \
                 WHERE status_id = $2 \
                 ORDER BY created_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(JobStatus::Running.id())
            .bind(JobStatus::Queued.id())
            .fetch_optional(pool)
            .await
    }

    /// Transition a job to `Running` and stamp `started_at`.
    pub async fn mark_running(pool: &PgPool, job_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE episode_jobs SET status_id = $2, started_at = NOW() WHERE id = $1")
            .bind(job_id)
            .bind(JobStatus::Running.id())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a job `Done` with its output payload, accumulating cost.
    ///
    /// `cost_units` is additive so a stage that reports cost in slices
    /// never loses previously recorded units.
    pub async fn complete(
        pool: &PgPool,
        job_id: DbId,
        output: &serde_json::Value,
        cost_units: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE episode_jobs \
             SET status_id = $2, output = $3, \
                 cost_units = cost_units + $4, \
                 completed_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Done.id())
        .bind(output)
        .bind(cost_units)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job `Failed`, record the error, and bump `retry_count`.
    ///
    /// Returns the post-increment retry count so the caller can consult
    /// the retry policy without a second round trip.
    pub async fn fail(
        pool: &PgPool,
        job_id: DbId,
        error: &str,
    ) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "UPDATE episode_jobs \
             SET status_id = $2, error_message = $3, \
                 retry_count = retry_count + 1, \
                 completed_at = NOW() \
             WHERE id = $1 \
             RETURNING retry_count",
        )
        .bind(job_id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Force a job into `Failed` without touching `retry_count`.
    ///
    /// Used by the terminal failure handler and by precondition failures
    /// (which are never retried).
    pub async fn fail_terminal(
        pool: &PgPool,
        job_id: DbId,
        error: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE episode_jobs \
             SET status_id = $2, error_message = $3, completed_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Manual retry of a failed job: back to `Queued`, error cleared.
    ///
    /// `retry_count` is deliberately NOT reset; only automatic retries
    /// increment it, and a manual retry keeps that history. Returns `false`
    /// when the job is not currently `Failed`.
    pub async fn requeue(pool: &PgPool, job_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE episode_jobs \
             SET status_id = $2, error_message = NULL, \
                 started_at = NULL, completed_at = NULL \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(job_id)
        .bind(JobStatus::Queued.id())
        .bind(JobStatus::Failed.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Automatic retry re-enqueue: back to `Queued`, keeping both the
    /// error message (until the next attempt overwrites it) and the
    /// retry count.
    pub async fn requeue_auto(pool: &PgPool, job_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE episode_jobs \
             SET status_id = $2, started_at = NULL, completed_at = NULL \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(job_id)
        .bind(JobStatus::Queued.id())
        .bind(JobStatus::Failed.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
