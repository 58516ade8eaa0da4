//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Side effects of lifecycle changes (SNS posting on publication, alerting
//! on pipeline failure) subscribe here instead of hooking model mutations,
//! so the trigger is visible and testable.

use chrono::{DateTime, Utc};
use inkforge_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// An episode was made publicly visible.
pub const EPISODE_ACTIVATED: &str = "episode.activated";
/// An episode was taken back down to the generated-unpublished state.
pub const EPISODE_DEACTIVATED: &str = "episode.deactivated";
/// A full five-stage pipeline run finished successfully.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// A full pipeline run aborted.
pub const PIPELINE_FAILED: &str = "pipeline.failed";

/// A domain event that occurred in the generation platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"episode.activated"`.
    pub event_type: String,

    /// Id of the episode the event concerns, when applicable.
    pub episode_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            episode_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the episode the event concerns.
    pub fn with_episode(mut self, episode_id: DbId) -> Self {
        self.episode_id = Some(episode_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published [`DomainEvent`]. Shared via
/// `Arc<EventBus>` across the worker.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
