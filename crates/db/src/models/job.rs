//! Generation job entity models and DTOs.

use inkforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `episode_jobs` table: one unit of generation work.
///
/// `cost_units` only ever accumulates; `completed_at` is set exactly when
/// the job reaches `Done` or `Failed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub episode_id: Option<DbId>,
    pub job_type: String,
    pub status_id: StatusId,
    pub input: serde_json::Value,
    pub output: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub cost_units: f64,
    pub retry_count: i32,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new queued job.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub episode_id: Option<DbId>,
    pub job_type: String,
    pub input: serde_json::Value,
}
