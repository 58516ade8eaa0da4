//! Project entity model.

use inkforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// The project snapshot (title, genre, tone, world setting) is embedded
/// into engine request payloads so generation stays on-style.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub genre: String,
    pub target_country: String,
    pub tone: String,
    pub target_audience: String,
    pub keywords: serde_json::Value,
    pub world_setting: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
