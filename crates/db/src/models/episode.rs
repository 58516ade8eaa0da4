//! Episode entity model.

use inkforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::status::StatusId;

/// An episode row from the `episodes` table.
///
/// `script_text` and `storyboard` are written by the text and director
/// stages respectively; `generation_metadata` accumulates per-stage
/// bookkeeping via JSONB merges and is never replaced wholesale.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub project_id: DbId,
    pub episode_number: i32,
    pub title: Option<String>,
    pub script_text: Option<String>,
    pub storyboard: Option<serde_json::Value>,
    pub status_id: StatusId,
    pub generation_metadata: serde_json::Value,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Episode {
    /// Storyboard panel list, empty when the director stage has not run.
    pub fn storyboard_panels(&self) -> &[serde_json::Value] {
        self.storyboard
            .as_ref()
            .and_then(|s| s.get("panels"))
            .and_then(|p| p.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
