//! HTTP clients for the five external AI generation engines.
//!
//! The pipeline consumes engines through the [`GenerationEngine`] trait so
//! the orchestrator can be exercised against a scripted double in tests
//! while production wires in [`client::HttpEngineClient`].

pub mod client;
pub mod config;
pub mod types;

pub use client::{EngineError, HttpEngineClient};
pub use config::EngineConfig;

use async_trait::async_trait;
use types::{
    ImageBatchRequest, ImageBatchResponse, LetteredPanel, LetteringRequest, PackagedWebtoon,
    PackagingRequest, ScriptRequest, ScriptResponse, StoryboardRequest, StoryboardResponse,
};

/// The seam between the pipeline orchestrator and the external engines.
///
/// One method per stage call. Lettering is per-image: the executor calls
/// [`apply_lettering`](Self::apply_lettering) once per generated panel.
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, EngineError>;

    async fn generate_storyboard(
        &self,
        req: &StoryboardRequest,
    ) -> Result<StoryboardResponse, EngineError>;

    async fn generate_images(
        &self,
        req: &ImageBatchRequest,
    ) -> Result<ImageBatchResponse, EngineError>;

    async fn apply_lettering(&self, req: &LetteringRequest)
        -> Result<LetteredPanel, EngineError>;

    async fn pack_webtoon(&self, req: &PackagingRequest)
        -> Result<PackagedWebtoon, EngineError>;
}
