#![allow(dead_code)]

//! Shared test doubles: an in-memory [`PipelineStore`] and a scripted
//! [`GenerationEngine`] that records which engines were called.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use inkforge_core::retry::RetryPolicy;
use inkforge_core::types::DbId;
use inkforge_db::models::asset::{Asset, CreateAsset};
use inkforge_db::models::episode::Episode;
use inkforge_db::models::job::{CreateJob, Job};
use inkforge_db::models::project::Project;
use inkforge_db::models::status::{EpisodeStatus, JobStatus, StatusId};
use inkforge_engines::types::{
    EngineMetadata, GeneratedImage, ImageBatchRequest, ImageBatchResponse, ImageBatchResult,
    LetteredPanel, LetteringRequest, PackagedWebtoon, PackagingRequest, ScriptRequest,
    ScriptResponse, ScriptResult, StoryboardRequest, StoryboardResponse, StoryboardResult,
};
use inkforge_engines::{EngineError, GenerationEngine};
use inkforge_events::EventBus;
use inkforge_pipeline::{
    Dispatcher, EpisodeProjector, PipelineSequencer, PipelineStore, PollConfig, StageExecutor,
    StoreError,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct State {
    next_id: DbId,
    jobs: HashMap<DbId, Job>,
    episodes: HashMap<DbId, Episode>,
    projects: HashMap<DbId, Project>,
    assets: Vec<Asset>,
}

impl State {
    fn alloc_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store mirroring the repository semantics.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    /// Number of `job()` fetches, for waiter poll-count assertions.
    pub job_fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Seeding --

    pub fn seed_project(&self) -> Project {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let project = Project {
            id: state.alloc_id(),
            title: "Moonlight Academy".to_string(),
            genre: "fantasy".to_string(),
            target_country: "KR".to_string(),
            tone: "serious".to_string(),
            target_audience: "teen".to_string(),
            keywords: json!(["magic", "school"]),
            world_setting: None,
            created_at: now,
            updated_at: now,
        };
        state.projects.insert(project.id, project.clone());
        project
    }

    pub fn seed_episode(&self, project_id: DbId) -> Episode {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let episode = Episode {
            id: state.alloc_id(),
            project_id,
            episode_number: 1,
            title: Some("Episode 1".to_string()),
            script_text: None,
            storyboard: None,
            status_id: EpisodeStatus::Draft.id(),
            generation_metadata: json!({}),
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        state.episodes.insert(episode.id, episode.clone());
        episode
    }

    pub fn seed_job(
        &self,
        episode_id: Option<DbId>,
        job_type: &str,
        input: serde_json::Value,
    ) -> Job {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let job = Job {
            id: state.alloc_id(),
            episode_id,
            job_type: job_type.to_string(),
            status_id: JobStatus::Queued.id(),
            input,
            output: None,
            error_message: None,
            cost_units: 0.0,
            retry_count: 0,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        state.jobs.insert(job.id, job.clone());
        job
    }

    pub fn seed_asset(&self, episode_id: DbId, kind: &str, path: &str) -> Asset {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let asset = Asset {
            id: state.alloc_id(),
            episode_id,
            kind: kind.to_string(),
            path: path.to_string(),
            file_size_bytes: 1024,
            metadata: json!({}),
            created_at: now,
            updated_at: now,
        };
        state.assets.push(asset.clone());
        asset
    }

    // -- Direct inspection, bypassing the trait --

    pub fn job_sync(&self, id: DbId) -> Job {
        self.state.lock().unwrap().jobs[&id].clone()
    }

    pub fn episode_sync(&self, id: DbId) -> Episode {
        self.state.lock().unwrap().episodes[&id].clone()
    }

    pub fn assets_sync(&self, episode_id: DbId, kind: &str) -> Vec<Asset> {
        self.state
            .lock()
            .unwrap()
            .assets
            .iter()
            .filter(|a| a.episode_id == episode_id && a.kind == kind)
            .cloned()
            .collect()
    }

    pub fn jobs_of_type(&self, job_type: &str) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .state
            .lock()
            .unwrap()
            .jobs
            .values()
            .filter(|j| j.job_type == job_type)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        jobs
    }

    // -- Direct mutation, for arranging states --

    pub fn set_job_retry_count(&self, id: DbId, retry_count: i32) {
        if let Some(job) = self.state.lock().unwrap().jobs.get_mut(&id) {
            job.retry_count = retry_count;
        }
    }

    pub fn set_job_status(&self, id: DbId, status: StatusId) {
        if let Some(job) = self.state.lock().unwrap().jobs.get_mut(&id) {
            job.status_id = status;
        }
    }

    pub fn set_episode_script_sync(&self, id: DbId, script: &str) {
        if let Some(ep) = self.state.lock().unwrap().episodes.get_mut(&id) {
            ep.script_text = Some(script.to_string());
        }
    }

    pub fn set_episode_storyboard_sync(&self, id: DbId, storyboard: serde_json::Value) {
        if let Some(ep) = self.state.lock().unwrap().episodes.get_mut(&id) {
            ep.storyboard = Some(storyboard);
        }
    }

    pub fn set_episode_status_sync(&self, id: DbId, status: StatusId) {
        if let Some(ep) = self.state.lock().unwrap().episodes.get_mut(&id) {
            ep.status_id = status;
        }
    }
}

#[async_trait]
impl PipelineStore for MemoryStore {
    async fn create_job(&self, input: &CreateJob) -> Result<Job, StoreError> {
        Ok(self.seed_job(input.episode_id, &input.job_type, input.input.clone()))
    }

    async fn job(&self, id: DbId) -> Result<Job, StoreError> {
        self.job_fetches.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .jobs
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Job", id))
    }

    async fn claim_next_job(&self) -> Result<Option<Job>, StoreError> {
        let mut state = self.state.lock().unwrap();
        let next_id = state
            .jobs
            .values()
            .filter(|j| j.status_id == JobStatus::Queued.id())
            .min_by_key(|j| (j.created_at, j.id))
            .map(|j| j.id);
        Ok(next_id.map(|id| {
            let job = state.jobs.get_mut(&id).unwrap();
            job.status_id = JobStatus::Running.id();
            job.started_at = Some(Utc::now());
            job.clone()
        }))
    }

    async fn mark_job_running(&self, id: DbId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        job.status_id = JobStatus::Running.id();
        job.started_at = Some(Utc::now());
        Ok(())
    }

    async fn complete_job(
        &self,
        id: DbId,
        output: &serde_json::Value,
        cost_units: f64,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        job.status_id = JobStatus::Done.id();
        job.output = Some(output.clone());
        job.cost_units += cost_units;
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn fail_job(&self, id: DbId, error: &str) -> Result<i32, StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        job.status_id = JobStatus::Failed.id();
        job.error_message = Some(error.to_string());
        job.retry_count += 1;
        job.completed_at = Some(Utc::now());
        Ok(job.retry_count)
    }

    async fn fail_job_terminal(&self, id: DbId, error: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        job.status_id = JobStatus::Failed.id();
        job.error_message = Some(error.to_string());
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn requeue_job(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        if job.status_id != JobStatus::Failed.id() {
            return Ok(false);
        }
        job.status_id = JobStatus::Queued.id();
        job.error_message = None;
        job.started_at = None;
        job.completed_at = None;
        Ok(true)
    }

    async fn requeue_job_auto(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Job", id))?;
        if job.status_id != JobStatus::Failed.id() {
            return Ok(false);
        }
        job.status_id = JobStatus::Queued.id();
        job.started_at = None;
        job.completed_at = None;
        Ok(true)
    }

    async fn episode(&self, id: DbId) -> Result<Episode, StoreError> {
        self.state
            .lock()
            .unwrap()
            .episodes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Episode", id))
    }

    async fn set_episode_status(&self, id: DbId, status: StatusId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        ep.status_id = status;
        Ok(())
    }

    async fn set_episode_script(&self, id: DbId, script_text: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        ep.script_text = Some(script_text.to_string());
        Ok(())
    }

    async fn set_episode_storyboard(
        &self,
        id: DbId,
        storyboard: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        ep.storyboard = Some(storyboard.clone());
        Ok(())
    }

    async fn merge_episode_metadata(
        &self,
        id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        // Shallow merge, matching the JSONB `||` operator.
        if let (Some(target), Some(source)) =
            (ep.generation_metadata.as_object_mut(), patch.as_object())
        {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn publish_episode(&self, id: DbId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        ep.status_id = EpisodeStatus::Published.id();
        ep.published_at = Some(Utc::now());
        Ok(())
    }

    async fn unpublish_episode(&self, id: DbId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let ep = state
            .episodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Episode", id))?;
        ep.status_id = EpisodeStatus::Done.id();
        ep.published_at = None;
        Ok(())
    }

    async fn project(&self, id: DbId) -> Result<Project, StoreError> {
        self.state
            .lock()
            .unwrap()
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Project", id))
    }

    async fn create_asset(&self, input: &CreateAsset) -> Result<Asset, StoreError> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let asset = Asset {
            id: state.alloc_id(),
            episode_id: input.episode_id,
            kind: input.kind.clone(),
            path: input.path.clone(),
            file_size_bytes: input.file_size_bytes,
            metadata: input.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        state.assets.push(asset.clone());
        Ok(asset)
    }

    async fn assets_by_kind(
        &self,
        episode_id: DbId,
        kind: &str,
    ) -> Result<Vec<Asset>, StoreError> {
        Ok(self.assets_sync(episode_id, kind))
    }
}

// ---------------------------------------------------------------------------
// FaultyStore
// ---------------------------------------------------------------------------

/// Fault-injecting wrapper around a [`MemoryStore`].
///
/// Lets tests make a job look permanently non-terminal to pollers, or make
/// metadata merges fail as if the database connection dropped mid-stage.
pub struct FaultyStore {
    pub inner: Arc<MemoryStore>,
    stalled_job_type: Mutex<Option<String>>,
    fail_metadata_merges: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            stalled_job_type: Mutex::new(None),
            fail_metadata_merges: AtomicBool::new(false),
        }
    }

    /// `job()` reports jobs of this type as still `Running`, whatever the
    /// inner store says.
    pub fn stall_jobs_of_type(&self, job_type: &str) {
        *self.stalled_job_type.lock().unwrap() = Some(job_type.to_string());
    }

    /// Every `merge_episode_metadata` call fails with a database error.
    pub fn fail_metadata_merges(&self) {
        self.fail_metadata_merges.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PipelineStore for FaultyStore {
    async fn create_job(&self, input: &CreateJob) -> Result<Job, StoreError> {
        self.inner.create_job(input).await
    }

    async fn job(&self, id: DbId) -> Result<Job, StoreError> {
        let mut job = self.inner.job(id).await?;
        let stalled = self.stalled_job_type.lock().unwrap().clone();
        if stalled.as_deref() == Some(job.job_type.as_str()) {
            job.status_id = JobStatus::Running.id();
        }
        Ok(job)
    }

    async fn claim_next_job(&self) -> Result<Option<Job>, StoreError> {
        self.inner.claim_next_job().await
    }

    async fn mark_job_running(&self, id: DbId) -> Result<(), StoreError> {
        self.inner.mark_job_running(id).await
    }

    async fn complete_job(
        &self,
        id: DbId,
        output: &serde_json::Value,
        cost_units: f64,
    ) -> Result<(), StoreError> {
        self.inner.complete_job(id, output, cost_units).await
    }

    async fn fail_job(&self, id: DbId, error: &str) -> Result<i32, StoreError> {
        self.inner.fail_job(id, error).await
    }

    async fn fail_job_terminal(&self, id: DbId, error: &str) -> Result<(), StoreError> {
        self.inner.fail_job_terminal(id, error).await
    }

    async fn requeue_job(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.requeue_job(id).await
    }

    async fn requeue_job_auto(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.requeue_job_auto(id).await
    }

    async fn episode(&self, id: DbId) -> Result<Episode, StoreError> {
        self.inner.episode(id).await
    }

    async fn set_episode_status(&self, id: DbId, status: StatusId) -> Result<(), StoreError> {
        self.inner.set_episode_status(id, status).await
    }

    async fn set_episode_script(&self, id: DbId, script_text: &str) -> Result<(), StoreError> {
        self.inner.set_episode_script(id, script_text).await
    }

    async fn set_episode_storyboard(
        &self,
        id: DbId,
        storyboard: &serde_json::Value,
    ) -> Result<(), StoreError> {
        self.inner.set_episode_storyboard(id, storyboard).await
    }

    async fn merge_episode_metadata(
        &self,
        id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), StoreError> {
        if self.fail_metadata_merges.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.inner.merge_episode_metadata(id, patch).await
    }

    async fn publish_episode(&self, id: DbId) -> Result<(), StoreError> {
        self.inner.publish_episode(id).await
    }

    async fn unpublish_episode(&self, id: DbId) -> Result<(), StoreError> {
        self.inner.unpublish_episode(id).await
    }

    async fn project(&self, id: DbId) -> Result<Project, StoreError> {
        self.inner.project(id).await
    }

    async fn create_asset(&self, input: &CreateAsset) -> Result<Asset, StoreError> {
        self.inner.create_asset(input).await
    }

    async fn assets_by_kind(
        &self,
        episode_id: DbId,
        kind: &str,
    ) -> Result<Vec<Asset>, StoreError> {
        self.inner.assets_by_kind(episode_id, kind).await
    }
}

// ---------------------------------------------------------------------------
// ScriptedEngine
// ---------------------------------------------------------------------------

/// Canned-response engine double. Records every call; individual engines
/// can be scripted to fail.
#[derive(Default)]
pub struct ScriptedEngine {
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, String>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named engine fail: one of `script`, `storyboard`, `images`,
    /// `lettering`, `packaging`.
    pub fn fail(&self, engine: &'static str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(engine, message.to_string());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, engine: &'static str) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(engine);
        if let Some(message) = self.failures.lock().unwrap().get(engine) {
            return Err(EngineError::Rejected(message.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl GenerationEngine for ScriptedEngine {
    async fn generate_script(&self, _req: &ScriptRequest) -> Result<ScriptResponse, EngineError> {
        self.record("script")?;
        Ok(ScriptResponse {
            result: ScriptResult {
                script_text: "Scene 1. Mina enters the academy gates.".to_string(),
                word_count: 1800,
                estimated_panels: 4,
                scenes: vec![json!({"scene": 1})],
            },
            metadata: EngineMetadata { cost_units: 1.5 },
        })
    }

    async fn generate_storyboard(
        &self,
        req: &StoryboardRequest,
    ) -> Result<StoryboardResponse, EngineError> {
        self.record("storyboard")?;
        let panels = (1..=req.inputs.target_panels)
            .map(|n| {
                json!({
                    "panel_number": n,
                    "visual_prompt": format!("panel {n} composition"),
                    "dialogue": format!("line {n}"),
                    "characters": ["mina"],
                })
            })
            .collect::<Vec<_>>();
        Ok(StoryboardResponse {
            result: StoryboardResult {
                total_panels: panels.len() as u32,
                panels,
            },
            metadata: EngineMetadata { cost_units: 2.0 },
        })
    }

    async fn generate_images(
        &self,
        req: &ImageBatchRequest,
    ) -> Result<ImageBatchResponse, EngineError> {
        self.record("images")?;
        let images = req
            .panels
            .iter()
            .map(|p| GeneratedImage {
                panel_number: p.panel_number,
                image_url: format!(
                    "s3://episodes/{}/panel-{}.png",
                    req.episode_id, p.panel_number
                ),
                width: p.width,
                height: p.height,
                size_mb: 1.2,
            })
            .collect::<Vec<_>>();
        Ok(ImageBatchResponse {
            result: ImageBatchResult {
                total_size_mb: 1.2 * images.len() as f64,
                images,
            },
            metadata: EngineMetadata { cost_units: 4.0 },
        })
    }

    async fn apply_lettering(
        &self,
        req: &LetteringRequest,
    ) -> Result<LetteredPanel, EngineError> {
        self.record("lettering")?;
        Ok(LetteredPanel {
            lettered_image_url: req.image_path.replace(".png", "-lettered.png"),
            panel_number: req.panel_number,
            dialogue: req.dialogues.first().cloned(),
            speaker: None,
        })
    }

    async fn pack_webtoon(&self, req: &PackagingRequest) -> Result<PackagedWebtoon, EngineError> {
        self.record("packaging")?;
        Ok(PackagedWebtoon {
            final_webtoon_url: format!("s3://episodes/{}/final.png", req.episode_id),
            total_panels: req.panels.len() as u32,
            width: 1024,
            height: 1448 * req.panels.len() as u32,
            file_size_mb: 8.5,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixture wiring
// ---------------------------------------------------------------------------

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub engine: Arc<ScriptedEngine>,
    pub events: Arc<EventBus>,
    pub projector: EpisodeProjector,
    pub executor: StageExecutor,
    pub sequencer: PipelineSequencer,
    pub dispatcher: Dispatcher,
}

/// Wire the whole orchestrator over the in-memory doubles, with a fast
/// poll interval.
pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(ScriptedEngine::new());
    let events = Arc::new(EventBus::default());

    let store_dyn: Arc<dyn PipelineStore> = store.clone();
    let projector = EpisodeProjector::new(store_dyn.clone(), events.clone());
    let executor = StageExecutor::new(
        store_dyn.clone(),
        engine.clone(),
        projector.clone(),
        RetryPolicy::default(),
    );
    let poll = PollConfig {
        interval_ms: 1,
        max_attempts: 10,
    };
    let sequencer = PipelineSequencer::new(
        store_dyn.clone(),
        executor.clone(),
        projector.clone(),
        poll,
        events.clone(),
    );
    let dispatcher = Dispatcher::new(
        store_dyn,
        executor.clone(),
        PipelineSequencer::new(
            store.clone(),
            executor.clone(),
            projector.clone(),
            poll,
            events.clone(),
        ),
    );

    Fixture {
        store,
        engine,
        events,
        projector,
        executor,
        sequencer,
        dispatcher,
    }
}

pub struct FaultyFixture {
    pub store: Arc<MemoryStore>,
    pub faults: Arc<FaultyStore>,
    pub engine: Arc<ScriptedEngine>,
    pub events: Arc<EventBus>,
    pub sequencer: PipelineSequencer,
}

/// Wire a sequencer over the fault-injecting store, with a tight poll budget
/// so stall scenarios time out quickly.
pub fn faulty_fixture() -> FaultyFixture {
    let inner = Arc::new(MemoryStore::new());
    let faults = Arc::new(FaultyStore::new(inner.clone()));
    let engine = Arc::new(ScriptedEngine::new());
    let events = Arc::new(EventBus::default());

    let store_dyn: Arc<dyn PipelineStore> = faults.clone();
    let projector = EpisodeProjector::new(store_dyn.clone(), events.clone());
    let executor = StageExecutor::new(
        store_dyn.clone(),
        engine.clone(),
        projector.clone(),
        RetryPolicy::default(),
    );
    let poll = PollConfig {
        interval_ms: 1,
        max_attempts: 3,
    };
    let sequencer = PipelineSequencer::new(store_dyn, executor, projector, poll, events.clone());

    FaultyFixture {
        store: inner,
        faults,
        engine,
        events,
        sequencer,
    }
}
