//! Pure domain logic for the webtoon generation pipeline.
//!
//! Zero internal dependencies by design: everything here is usable from the
//! persistence layer, the orchestrator, and any future CLI tooling without
//! pulling in sqlx or tokio.

pub mod error;
pub mod lifecycle;
pub mod preflight;
pub mod retry;
pub mod stage;
pub mod types;
