//! Wire types for the engine HTTP APIs.
//!
//! Project and episode snapshots travel as opaque JSON: the engines only
//! read style/context fields from them, and keeping them untyped means a
//! schema change on the CRUD side cannot break the pipeline.

use inkforge_core::types::DbId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Cost accounting reported by the text/director/image engines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineMetadata {
    #[serde(default)]
    pub cost_units: f64,
}

// ---------------------------------------------------------------------------
// Text engine: POST {base}/engine/text/script
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub project: serde_json::Value,
    pub episode: serde_json::Value,
    pub inputs: ScriptInputs,
    pub options: ScriptOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptInputs {
    pub keywords: Vec<String>,
    pub target_word_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptOptions {
    pub language: String,
    pub tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub result: ScriptResult,
    #[serde(default)]
    pub metadata: EngineMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_text: String,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub estimated_panels: u32,
    #[serde(default)]
    pub scenes: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Director engine: POST {base}/engine/director/storyboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardRequest {
    pub project: serde_json::Value,
    pub episode: serde_json::Value,
    pub inputs: StoryboardInputs,
    pub options: StoryboardOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardInputs {
    pub target_panels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardOptions {
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardResponse {
    pub result: StoryboardResult,
    #[serde(default)]
    pub metadata: EngineMetadata,
}

/// Persisted verbatim into `episodes.storyboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardResult {
    pub panels: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_panels: u32,
}

// ---------------------------------------------------------------------------
// Image engine: POST {base}/engine/image/generate-batch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBatchRequest {
    pub episode_id: DbId,
    pub panels: Vec<PanelImageRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelImageRequest {
    pub panel_number: u32,
    pub visual_prompt: String,
    #[serde(default)]
    pub characters: Vec<String>,
    pub style: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBatchResponse {
    pub result: ImageBatchResult,
    #[serde(default)]
    pub metadata: EngineMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBatchResult {
    pub images: Vec<GeneratedImage>,
    #[serde(default)]
    pub total_size_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub panel_number: u32,
    pub image_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub size_mb: f64,
}

// ---------------------------------------------------------------------------
// Lettering engine: POST {base}/engine/lettering/apply (per image)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetteringRequest {
    pub image_path: String,
    pub dialogues: Vec<String>,
    pub panel_number: u32,
    pub font_size: u32,
    pub output_format: String,
}

/// Raw lettering envelope; `success: false` is a stage failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetteringResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<LetteredPanel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetteredPanel {
    pub lettered_image_url: String,
    pub panel_number: u32,
    #[serde(default)]
    pub dialogue: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
}

// ---------------------------------------------------------------------------
// Packaging engine: POST {base}/engine/pack/webtoon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingRequest {
    pub panels: Vec<PackagingPanel>,
    pub episode_id: DbId,
    pub layout: String,
    pub spacing: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingPanel {
    pub panel_number: u32,
    pub lettered_image_url: String,
}

/// Raw packaging envelope; `success: false` is a stage failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<PackagedWebtoon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagedWebtoon {
    pub final_webtoon_url: String,
    #[serde(default)]
    pub total_panels: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub file_size_mb: f64,
}
