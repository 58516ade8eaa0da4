//! Production HTTP client for the generation engines.
//!
//! One [`HttpEngineClient`] serves all five engines; each call uses the
//! stage's own timeout and surfaces non-2xx bodies and `success: false`
//! envelopes as [`EngineError`]s so the executor can persist them into the
//! job's `error_message`.

use std::time::Duration;

use async_trait::async_trait;
use inkforge_core::stage::Stage;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::types::{
    ImageBatchRequest, ImageBatchResponse, LetteredPanel, LetteringRequest, LetteringResponse,
    PackagedWebtoon, PackagingRequest, PackagingResponse, ScriptRequest, ScriptResponse,
    StoryboardRequest, StoryboardResponse,
};
use crate::GenerationEngine;

/// Errors from an engine call.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Transport-level failure: connect error, HTTP timeout, bad body.
    #[error("Engine request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine answered with a non-2xx status.
    #[error("Engine returned error: HTTP {status} - {body}")]
    Status { status: u16, body: String },

    /// The engine answered 2xx but reported `success: false`.
    #[error("Engine rejected request: {0}")]
    Rejected(String),
}

/// Reqwest-backed client for all five engines.
pub struct HttpEngineClient {
    http: reqwest::Client,
    config: EngineConfig,
}

impl HttpEngineClient {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// POST `body` to `url` with the stage's timeout and decode the
    /// response as `R`. Non-2xx responses become [`EngineError::Status`]
    /// with the raw body preserved.
    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
        body: &B,
    ) -> Result<R, EngineError> {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::debug!(stage = stage.display_name(), url, %request_id, "Calling engine");

        let response = self
            .http
            .post(url)
            .timeout(Duration::from_secs(stage.timeout_secs()))
            .header("x-request-id", &request_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl GenerationEngine for HttpEngineClient {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, EngineError> {
        let url = format!("{}/engine/text/script", self.config.text_url);
        self.post_json(Stage::TextScript, &url, req).await
    }

    async fn generate_storyboard(
        &self,
        req: &StoryboardRequest,
    ) -> Result<StoryboardResponse, EngineError> {
        let url = format!("{}/engine/director/storyboard", self.config.director_url);
        self.post_json(Stage::DirectorStoryboard, &url, req).await
    }

    async fn generate_images(
        &self,
        req: &ImageBatchRequest,
    ) -> Result<ImageBatchResponse, EngineError> {
        let url = format!("{}/engine/image/generate-batch", self.config.image_url);
        self.post_json(Stage::ImageGenerate, &url, req).await
    }

    async fn apply_lettering(
        &self,
        req: &LetteringRequest,
    ) -> Result<LetteredPanel, EngineError> {
        let url = format!("{}/engine/lettering/apply", self.config.lettering_url);
        let response: LetteringResponse = self.post_json(Stage::LetteringApply, &url, req).await?;

        if !response.success {
            return Err(EngineError::Rejected(
                response.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        response.result.ok_or_else(|| {
            EngineError::Rejected("Lettering engine returned no result".to_string())
        })
    }

    async fn pack_webtoon(
        &self,
        req: &PackagingRequest,
    ) -> Result<PackagedWebtoon, EngineError> {
        let url = format!("{}/engine/pack/webtoon", self.config.packaging_url);
        let response: PackagingResponse = self.post_json(Stage::PackagingWebtoon, &url, req).await?;

        if !response.success {
            return Err(EngineError::Rejected(
                response.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        response.result.ok_or_else(|| {
            EngineError::Rejected("Packaging engine returned no result".to_string())
        })
    }
}
