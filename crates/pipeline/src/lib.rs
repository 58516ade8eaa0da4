//! The generation pipeline orchestrator.
//!
//! Drives an episode through the five-stage pipeline: per-stage execution
//! against the external engines ([`executor`]), the full-run sequencer
//! ([`sequencer`]), episode status projection ([`projector`]), the bounded
//! polling waiter ([`waiter`]), and the worker dispatch loop
//! ([`dispatcher`]). All of it runs against the [`store::PipelineStore`]
//! seam so the orchestration logic is testable without Postgres.

pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod pg;
pub mod projector;
pub mod sequencer;
pub mod store;
pub mod waiter;

pub use dispatcher::Dispatcher;
pub use error::PipelineError;
pub use executor::{ExecutionOutcome, StageExecutor};
pub use pg::PgStore;
pub use projector::EpisodeProjector;
pub use sequencer::PipelineSequencer;
pub use store::{PipelineStore, StoreError};
pub use waiter::{PollConfig, WaitOutcome};
