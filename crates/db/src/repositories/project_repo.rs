//! Repository for the `projects` table.

use inkforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::Project;

/// Column list for `projects` queries.
const COLUMNS: &str = "\
    id, title, genre, target_country, tone, target_audience, keywords, \
    world_setting, created_at, updated_at";

/// Read access to projects; rows are seeded outside the worker.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
