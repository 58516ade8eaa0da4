//! Generated asset models and DTOs.

use inkforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw generated panel image.
pub const KIND_IMAGE: &str = "image";
/// Panel image with dialogue lettering applied.
pub const KIND_LETTERED_IMAGE: &str = "lettered_image";
/// Final packaged vertical-scroll webtoon.
pub const KIND_FINAL_WEBTOON: &str = "final_webtoon";

/// A row from the `assets` table. Cascade-deleted with its episode.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub episode_id: DbId,
    pub kind: String,
    pub path: String,
    pub file_size_bytes: i64,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub episode_id: DbId,
    pub kind: String,
    pub path: String,
    pub file_size_bytes: i64,
    pub metadata: serde_json::Value,
}
