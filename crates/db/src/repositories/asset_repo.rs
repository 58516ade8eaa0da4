//! Repository for the `assets` table.

use inkforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, CreateAsset};

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    id, episode_id, kind, path, file_size_bytes, metadata, \
    created_at, updated_at";

/// Provides persistence for generated assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Register a new asset.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (episode_id, kind, path, file_size_bytes, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.episode_id)
            .bind(&input.kind)
            .bind(&input.path)
            .bind(input.file_size_bytes)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// List an episode's assets of one kind, in insertion order.
    ///
    /// Insertion order matters: the lettering stage zips images with
    /// storyboard panels by position.
    pub async fn list_by_kind(
        pool: &PgPool,
        episode_id: DbId,
        kind: &str,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE episode_id = $1 AND kind = $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(episode_id)
            .bind(kind)
            .fetch_all(pool)
            .await
    }
}
