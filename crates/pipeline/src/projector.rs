//! Episode status projection.
//!
//! The episode status is a projection of pipeline progress: it never drives
//! the pipeline, it mirrors it. Stage executors and the sequencer call the
//! projection methods inline; `activate`/`deactivate` are the explicit
//! publish gate exposed to the API layer.

use std::sync::Arc;

use inkforge_core::lifecycle::episode_state;
use inkforge_core::types::DbId;
use inkforge_db::models::episode::Episode;
use inkforge_events::{DomainEvent, EventBus, EPISODE_ACTIVATED, EPISODE_DEACTIVATED};

use crate::error::PipelineError;
use crate::store::PipelineStore;

#[derive(Clone)]
pub struct EpisodeProjector {
    store: Arc<dyn PipelineStore>,
    events: Arc<EventBus>,
}

impl EpisodeProjector {
    pub fn new(store: Arc<dyn PipelineStore>, events: Arc<EventBus>) -> Self {
        Self { store, events }
    }

    /// A stage (or the full pipeline) started working on the episode.
    pub async fn project_running(&self, episode_id: DbId) -> Result<(), PipelineError> {
        self.store
            .set_episode_status(episode_id, episode_state::RUNNING)
            .await?;
        Ok(())
    }

    /// A stage run completed and the episode content is in its resting
    /// generated state. The lettering stage does NOT project this: its
    /// output is intermediate and the episode stays `Running`.
    pub async fn project_done(&self, episode_id: DbId) -> Result<(), PipelineError> {
        self.store
            .set_episode_status(episode_id, episode_state::DONE)
            .await?;
        Ok(())
    }

    /// A stage failed; the episode mirrors the failure.
    pub async fn project_failed(&self, episode_id: DbId) -> Result<(), PipelineError> {
        self.store
            .set_episode_status(episode_id, episode_state::FAILED)
            .await?;
        Ok(())
    }

    /// Make a generated episode publicly visible.
    ///
    /// Only a `Done` episode may activate. Publishes `episode.activated`
    /// and returns the refreshed row.
    pub async fn activate(&self, episode_id: DbId) -> Result<Episode, PipelineError> {
        let episode = self.store.episode(episode_id).await?;
        if !episode_state::can_activate(episode.status_id) {
            return Err(PipelineError::Precondition(format!(
                "Episode must finish generation before activation (status: {})",
                episode_state::status_name(episode.status_id)
            )));
        }

        self.store.publish_episode(episode_id).await?;
        let published = self.store.episode(episode_id).await?;
        tracing::info!(episode_id, "Episode activated");

        self.events.publish(
            DomainEvent::new(EPISODE_ACTIVATED)
                .with_episode(episode_id)
                .with_payload(serde_json::json!({
                    "project_id": published.project_id,
                    "published_at": published.published_at,
                })),
        );

        Ok(published)
    }

    /// Take a published episode back down to the generated state.
    pub async fn deactivate(&self, episode_id: DbId) -> Result<Episode, PipelineError> {
        let episode = self.store.episode(episode_id).await?;
        if !episode_state::can_deactivate(episode.status_id) {
            return Err(PipelineError::Precondition(format!(
                "Only a published episode can be deactivated (status: {})",
                episode_state::status_name(episode.status_id)
            )));
        }

        self.store.unpublish_episode(episode_id).await?;
        tracing::info!(episode_id, "Episode deactivated");

        self.events.publish(
            DomainEvent::new(EPISODE_DEACTIVATED)
                .with_episode(episode_id)
                .with_payload(serde_json::json!({ "project_id": episode.project_id })),
        );

        self.store.episode(episode_id).await.map_err(Into::into)
    }
}
