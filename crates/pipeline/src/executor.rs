//! Single-stage job execution.
//!
//! One [`StageExecutor::execute`] call takes a queued stage job through its
//! whole lifecycle: precondition check, `Running`, engine call, side
//! effects, and the terminal `Done`/`Failed` state. Engine failures are
//! absorbed into the job row and reported to the caller as an
//! [`ExecutionOutcome`] so the dispatcher can act on the retry policy;
//! only infrastructure errors escape as `Err`.

use std::sync::Arc;

use chrono::Utc;
use inkforge_core::preflight::{self, PackagingSource};
use inkforge_core::retry::{RetryDecision, RetryPolicy};
use inkforge_core::stage::{self, Stage};
use inkforge_core::types::DbId;
use inkforge_db::models::asset::{self, CreateAsset};
use inkforge_db::models::episode::Episode;
use inkforge_db::models::job::Job;
use inkforge_engines::types::{
    ImageBatchRequest, LetteringRequest, PackagingPanel, PackagingRequest, PanelImageRequest,
    ScriptInputs, ScriptOptions, ScriptRequest, StoryboardInputs, StoryboardOptions,
    StoryboardRequest,
};
use inkforge_engines::{EngineError, GenerationEngine};
use serde_json::json;

use crate::error::PipelineError;
use crate::projector::EpisodeProjector;
use crate::store::{PipelineStore, StoreError};

/// Visual style tag sent with storyboard and image requests.
const GENERATION_STYLE: &str = "webtoon";

/// Language for script generation.
const SCRIPT_LANGUAGE: &str = "ko";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What happened to the job, for the dispatcher to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The job reached `Done`.
    Completed,
    /// A precondition failed before the engine was called. The job is
    /// `Failed` without a retry-count bump and must not be retried.
    Rejected,
    /// Transient engine failure; re-enqueue the same job after the delay.
    Retry { delay_secs: u64 },
    /// Engine failure with the retry budget spent. Terminal.
    Exhausted,
}

/// A stage runner's successful result.
struct StageSuccess {
    output: serde_json::Value,
    cost_units: f64,
    /// Whether the episode should be projected to `Done`. Lettering leaves
    /// the episode `Running` because its output is intermediate.
    project_done: bool,
}

/// Failure taxonomy inside a stage run.
enum StageFailure {
    /// Engine-side failure: recorded on the job row, subject to retry.
    Engine(String),
    /// Infrastructure failure: propagated to the caller as-is.
    Infra(PipelineError),
}

impl From<EngineError> for StageFailure {
    fn from(err: EngineError) -> Self {
        StageFailure::Engine(err.to_string())
    }
}

impl From<StoreError> for StageFailure {
    fn from(err: StoreError) -> Self {
        StageFailure::Infra(PipelineError::Store(err))
    }
}

impl From<serde_json::Error> for StageFailure {
    fn from(err: serde_json::Error) -> Self {
        StageFailure::Infra(PipelineError::Serialize(err))
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct StageExecutor {
    store: Arc<dyn PipelineStore>,
    engine: Arc<dyn GenerationEngine>,
    projector: EpisodeProjector,
    retry_policy: RetryPolicy,
}

impl StageExecutor {
    pub fn new(
        store: Arc<dyn PipelineStore>,
        engine: Arc<dyn GenerationEngine>,
        projector: EpisodeProjector,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            engine,
            projector,
            retry_policy,
        }
    }

    /// Run a stage job to a terminal state.
    pub async fn execute(&self, job_id: DbId) -> Result<ExecutionOutcome, PipelineError> {
        let job = self.store.job(job_id).await?;
        let stage =
            Stage::from_job_type(&job.job_type).ok_or_else(|| PipelineError::UnknownJobType {
                job_id,
                job_type: job.job_type.clone(),
            })?;
        let episode_id = job.episode_id.ok_or(PipelineError::MissingEpisode(job_id))?;
        let episode = self.store.episode(episode_id).await?;

        // Preconditions are checked while the job is still queued. A failed
        // check fails the job terminally, never calls the engine, and leaves
        // the episode status untouched.
        let script_len = episode.script_text.as_deref().map(str::len).unwrap_or(0);
        let panel_count = episode.storyboard_panels().len();
        let (image_count, lettered_count) = match stage {
            Stage::LetteringApply | Stage::PackagingWebtoon => (
                self.count_assets(episode_id, asset::KIND_IMAGE).await?,
                self.count_assets(episode_id, asset::KIND_LETTERED_IMAGE)
                    .await?,
            ),
            _ => (0, 0),
        };
        if let Err(err) = preflight::check_stage_preconditions(
            stage,
            script_len,
            panel_count,
            image_count,
            lettered_count,
        ) {
            let message = err.to_string();
            tracing::warn!(
                job_id,
                episode_id,
                stage = stage.display_name(),
                %message,
                "Stage precondition failed"
            );
            self.store.fail_job_terminal(job_id, &message).await?;
            return Ok(ExecutionOutcome::Rejected);
        }

        self.store.mark_job_running(job_id).await?;
        self.projector.project_running(episode_id).await?;
        tracing::info!(
            job_id,
            episode_id,
            stage = stage.display_name(),
            "Stage started"
        );

        let result = match stage {
            Stage::TextScript => self.run_text(&job, &episode).await,
            Stage::DirectorStoryboard => self.run_storyboard(&job, &episode).await,
            Stage::ImageGenerate => self.run_images(&episode).await,
            Stage::LetteringApply => self.run_lettering(&episode).await,
            Stage::PackagingWebtoon => self.run_packaging(&episode).await,
        };

        match result {
            Ok(success) => {
                self.store
                    .complete_job(job_id, &success.output, success.cost_units)
                    .await?;
                if success.project_done {
                    self.projector.project_done(episode_id).await?;
                }
                tracing::info!(
                    job_id,
                    episode_id,
                    stage = stage.display_name(),
                    cost_units = success.cost_units,
                    "Stage completed"
                );
                Ok(ExecutionOutcome::Completed)
            }
            Err(StageFailure::Infra(err)) => Err(err),
            Err(StageFailure::Engine(message)) => {
                let retry_count = self.store.fail_job(job_id, &message).await?;
                self.projector.project_failed(episode_id).await?;

                match self.retry_policy.decide(retry_count as u32) {
                    RetryDecision::Retry { delay_secs } => {
                        tracing::warn!(
                            job_id,
                            episode_id,
                            stage = stage.display_name(),
                            retry_count,
                            delay_secs,
                            %message,
                            "Stage failed, retry scheduled"
                        );
                        Ok(ExecutionOutcome::Retry { delay_secs })
                    }
                    RetryDecision::GiveUp => {
                        tracing::error!(
                            job_id,
                            episode_id,
                            stage = stage.display_name(),
                            retry_count,
                            %message,
                            "Stage failed, retries exhausted"
                        );
                        self.fail_terminally(job_id, Some(episode_id), &message)
                            .await?;
                        Ok(ExecutionOutcome::Exhausted)
                    }
                }
            }
        }
    }

    /// Terminal failure handler: force the job and its episode into
    /// `Failed`. Idempotent: safe on a job already marked failed.
    pub async fn fail_terminally(
        &self,
        job_id: DbId,
        episode_id: Option<DbId>,
        message: &str,
    ) -> Result<(), PipelineError> {
        self.store.fail_job_terminal(job_id, message).await?;
        if let Some(episode_id) = episode_id {
            self.projector.project_failed(episode_id).await?;
        }
        Ok(())
    }

    async fn count_assets(&self, episode_id: DbId, kind: &str) -> Result<usize, StoreError> {
        Ok(self.store.assets_by_kind(episode_id, kind).await?.len())
    }

    // -- Stage runners ------------------------------------------------------

    async fn run_text(&self, job: &Job, episode: &Episode) -> Result<StageSuccess, StageFailure> {
        let project = self.store.project(episode.project_id).await?;

        let request = ScriptRequest {
            project: serde_json::to_value(&project)?,
            episode: serde_json::to_value(episode)?,
            inputs: ScriptInputs {
                keywords: string_vec(&job.input, "keywords"),
                target_word_count: stage::DEFAULT_TARGET_WORD_COUNT,
            },
            options: ScriptOptions {
                language: SCRIPT_LANGUAGE.to_string(),
                tone: project.tone.clone(),
            },
        };

        let response = self.engine.generate_script(&request).await?;
        let result = response.result;

        self.store
            .set_episode_script(episode.id, &result.script_text)
            .await?;
        self.store
            .merge_episode_metadata(
                episode.id,
                &json!({
                    "text": {
                        "word_count": result.word_count,
                        "estimated_panels": result.estimated_panels,
                        "scenes_count": result.scenes.len(),
                        "generated_at": Utc::now().to_rfc3339(),
                    }
                }),
            )
            .await?;

        Ok(StageSuccess {
            output: serde_json::to_value(&result)?,
            cost_units: response.metadata.cost_units,
            project_done: true,
        })
    }

    async fn run_storyboard(
        &self,
        job: &Job,
        episode: &Episode,
    ) -> Result<StageSuccess, StageFailure> {
        let project = self.store.project(episode.project_id).await?;

        let request = StoryboardRequest {
            project: serde_json::to_value(&project)?,
            episode: serde_json::to_value(episode)?,
            inputs: StoryboardInputs {
                target_panels: u32_field(&job.input, "target_panels")
                    .unwrap_or(stage::DEFAULT_TARGET_PANELS),
            },
            options: StoryboardOptions {
                style: GENERATION_STYLE.to_string(),
            },
        };

        let response = self.engine.generate_storyboard(&request).await?;
        let result = response.result;
        let storyboard = serde_json::to_value(&result)?;

        self.store
            .set_episode_storyboard(episode.id, &storyboard)
            .await?;
        self.store
            .merge_episode_metadata(
                episode.id,
                &json!({
                    "director": {
                        "total_panels": result.total_panels,
                        "generated_at": Utc::now().to_rfc3339(),
                    }
                }),
            )
            .await?;

        Ok(StageSuccess {
            output: storyboard,
            cost_units: response.metadata.cost_units,
            project_done: true,
        })
    }

    async fn run_images(&self, episode: &Episode) -> Result<StageSuccess, StageFailure> {
        let panels: Vec<PanelImageRequest> = episode
            .storyboard_panels()
            .iter()
            .enumerate()
            .map(|(idx, panel)| PanelImageRequest {
                panel_number: u32_field(panel, "panel_number").unwrap_or(idx as u32 + 1),
                visual_prompt: str_field(panel, "visual_prompt").unwrap_or_default(),
                characters: string_vec(panel, "characters"),
                style: GENERATION_STYLE.to_string(),
                width: stage::PANEL_WIDTH,
                height: stage::PANEL_HEIGHT,
            })
            .collect();

        let response = self
            .engine
            .generate_images(&ImageBatchRequest {
                episode_id: episode.id,
                panels,
            })
            .await?;
        let result = response.result;

        for image in &result.images {
            self.store
                .create_asset(&CreateAsset {
                    episode_id: episode.id,
                    kind: asset::KIND_IMAGE.to_string(),
                    path: image.image_url.clone(),
                    file_size_bytes: mb_to_bytes(image.size_mb),
                    metadata: json!({
                        "panel_number": image.panel_number,
                        "width": image.width,
                        "height": image.height,
                    }),
                })
                .await?;
        }

        self.store
            .merge_episode_metadata(
                episode.id,
                &json!({
                    "images": {
                        "total_panels": result.images.len(),
                        "total_size_mb": result.total_size_mb,
                        "generated_at": Utc::now().to_rfc3339(),
                    }
                }),
            )
            .await?;

        Ok(StageSuccess {
            output: serde_json::to_value(&result)?,
            cost_units: response.metadata.cost_units,
            project_done: true,
        })
    }

    /// Lettering is per-image: one engine call per generated panel, zipped
    /// with storyboard panels by position. The episode stays `Running`.
    async fn run_lettering(&self, episode: &Episode) -> Result<StageSuccess, StageFailure> {
        let panels = episode.storyboard_panels().to_vec();
        let images = self
            .store
            .assets_by_kind(episode.id, asset::KIND_IMAGE)
            .await?;

        let mut lettered = Vec::with_capacity(images.len());
        for (idx, image) in images.iter().enumerate() {
            let panel = panels.get(idx);
            let request = LetteringRequest {
                image_path: image.path.clone(),
                dialogues: panel.map(dialogues_of).unwrap_or_default(),
                panel_number: panel
                    .and_then(|p| u32_field(p, "panel_number"))
                    .unwrap_or(idx as u32 + 1),
                font_size: stage::LETTERING_FONT_SIZE,
                output_format: "png".to_string(),
            };
            lettered.push(self.engine.apply_lettering(&request).await?);
        }

        for panel in &lettered {
            self.store
                .create_asset(&CreateAsset {
                    episode_id: episode.id,
                    kind: asset::KIND_LETTERED_IMAGE.to_string(),
                    path: panel.lettered_image_url.clone(),
                    file_size_bytes: 0,
                    metadata: json!({
                        "panel_number": panel.panel_number,
                        "dialogue": panel.dialogue,
                        "speaker": panel.speaker,
                    }),
                })
                .await?;
        }

        Ok(StageSuccess {
            output: json!({
                "lettered_images": lettered.len(),
                "source_images": images.len(),
            }),
            cost_units: stage::lettering_cost(lettered.len()),
            project_done: false,
        })
    }

    async fn run_packaging(&self, episode: &Episode) -> Result<StageSuccess, StageFailure> {
        let lettered = self
            .store
            .assets_by_kind(episode.id, asset::KIND_LETTERED_IMAGE)
            .await?;
        let images = self
            .store
            .assets_by_kind(episode.id, asset::KIND_IMAGE)
            .await?;

        let source = preflight::choose_packaging_source(lettered.len(), images.len())
            .map_err(|err| StageFailure::Engine(err.to_string()))?;
        let assets = match source {
            PackagingSource::Lettered => &lettered,
            PackagingSource::PlainImages => &images,
        };

        let request = PackagingRequest {
            panels: assets
                .iter()
                .enumerate()
                .map(|(idx, a)| PackagingPanel {
                    panel_number: u32_field(&a.metadata, "panel_number")
                        .unwrap_or(idx as u32 + 1),
                    lettered_image_url: a.path.clone(),
                })
                .collect(),
            episode_id: episode.id,
            layout: stage::PACKAGING_LAYOUT.to_string(),
            spacing: stage::PACKAGING_SPACING,
        };

        let result = self.engine.pack_webtoon(&request).await?;

        self.store
            .create_asset(&CreateAsset {
                episode_id: episode.id,
                kind: asset::KIND_FINAL_WEBTOON.to_string(),
                path: result.final_webtoon_url.clone(),
                file_size_bytes: mb_to_bytes(result.file_size_mb),
                metadata: json!({
                    "total_panels": result.total_panels,
                    "width": result.width,
                    "height": result.height,
                }),
            })
            .await?;
        self.store
            .merge_episode_metadata(
                episode.id,
                &json!({
                    "packaging": {
                        "final_webtoon_path": result.final_webtoon_url,
                        "file_size_mb": result.file_size_mb,
                        "packaged_at": Utc::now().to_rfc3339(),
                    }
                }),
            )
            .await?;

        Ok(StageSuccess {
            output: serde_json::to_value(&result)?,
            cost_units: stage::PACKAGING_COST,
            project_done: true,
        })
    }
}

// ---------------------------------------------------------------------------
// JSON field helpers
// ---------------------------------------------------------------------------

fn u32_field(value: &serde_json::Value, key: &str) -> Option<u32> {
    value.get(key).and_then(|v| v.as_u64()).map(|v| v as u32)
}

fn str_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn string_vec(value: &serde_json::Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// A panel's dialogue lines: accepts a single string or an array of strings.
fn dialogues_of(panel: &serde_json::Value) -> Vec<String> {
    match panel.get("dialogue") {
        Some(serde_json::Value::String(line)) => vec![line.clone()],
        Some(serde_json::Value::Array(lines)) => lines
            .iter()
            .filter_map(|line| line.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

fn mb_to_bytes(size_mb: f64) -> i64 {
    (size_mb * 1024.0 * 1024.0) as i64
}
