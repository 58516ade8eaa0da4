//! Repository for the `episodes` table.

use inkforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::episode::Episode;
use crate::models::status::{EpisodeStatus, StatusId};

/// Column list for `episodes` queries.
const COLUMNS: &str = "\
    id, project_id, episode_number, title, script_text, storyboard, \
    status_id, generation_metadata, published_at, created_at, updated_at";

/// Provides CRUD and pipeline side-effect writes for episodes.
pub struct EpisodeRepo;

impl EpisodeRepo {
    /// Find an episode by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the episode's lifecycle status.
    pub async fn set_status(
        pool: &PgPool,
        episode_id: DbId,
        status: StatusId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE episodes SET status_id = $2 WHERE id = $1")
            .bind(episode_id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Write the generated script (text stage side effect).
    pub async fn set_script(
        pool: &PgPool,
        episode_id: DbId,
        script_text: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE episodes SET script_text = $2 WHERE id = $1")
            .bind(episode_id)
            .bind(script_text)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Write the generated storyboard (director stage side effect).
    pub async fn set_storyboard(
        pool: &PgPool,
        episode_id: DbId,
        storyboard: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE episodes SET storyboard = $2 WHERE id = $1")
            .bind(episode_id)
            .bind(storyboard)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Shallow-merge a patch into `generation_metadata`.
    ///
    /// Uses the JSONB `||` operator: existing keys not present in the patch
    /// survive, so each stage's bookkeeping accumulates.
    pub async fn merge_metadata(
        pool: &PgPool,
        episode_id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE episodes \
             SET generation_metadata = generation_metadata || $2 \
             WHERE id = $1",
        )
        .bind(episode_id)
        .bind(patch)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Publish: move to `Published` and stamp `published_at`.
    pub async fn publish(pool: &PgPool, episode_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE episodes \
             SET status_id = $2, published_at = NOW() \
             WHERE id = $1",
        )
        .bind(episode_id)
        .bind(EpisodeStatus::Published.id())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Unpublish: back to `Done` with `published_at` cleared.
    pub async fn unpublish(pool: &PgPool, episode_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE episodes \
             SET status_id = $2, published_at = NULL \
             WHERE id = $1",
        )
        .bind(episode_id)
        .bind(EpisodeStatus::Done.id())
        .execute(pool)
        .await?;
        Ok(())
    }
}
