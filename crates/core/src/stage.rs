//! The five-stage generation pipeline: ordering, job-type strings,
//! per-stage HTTP timeouts, and fixed costs.
//!
//! The pipeline is a strict linear sequence, not a DAG. Stage N+1 may not
//! start before stage N reaches a terminal state.

// ---------------------------------------------------------------------------
// Job type strings
// ---------------------------------------------------------------------------

/// Job type for the umbrella job that tracks a whole five-stage run.
pub const JOB_TYPE_PIPELINE_FULL: &str = "pipeline.full";

// ---------------------------------------------------------------------------
// Stage definition
// ---------------------------------------------------------------------------

/// One of the five ordered generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Script generation from project/episode context and keywords.
    TextScript,
    /// Storyboard (panel list) generation from the script.
    DirectorStoryboard,
    /// Batch image generation from storyboard panels.
    ImageGenerate,
    /// Dialogue lettering applied to each generated image.
    LetteringApply,
    /// Final vertical-scroll webtoon packaging.
    PackagingWebtoon,
}

/// Fixed execution order of the pipeline. Non-negotiable: each stage
/// consumes the previous stage's output.
pub const PIPELINE_ORDER: [Stage; 5] = [
    Stage::TextScript,
    Stage::DirectorStoryboard,
    Stage::ImageGenerate,
    Stage::LetteringApply,
    Stage::PackagingWebtoon,
];

impl Stage {
    /// The `job_type` string persisted on job rows of this stage.
    pub fn job_type(self) -> &'static str {
        match self {
            Stage::TextScript => "text.script",
            Stage::DirectorStoryboard => "director.storyboard",
            Stage::ImageGenerate => "image.generate",
            Stage::LetteringApply => "lettering.apply",
            Stage::PackagingWebtoon => "packaging.webtoon",
        }
    }

    /// Parse a persisted `job_type` string back into a stage.
    ///
    /// Returns `None` for unknown types and for the umbrella type
    /// (`pipeline.full` is not a stage).
    pub fn from_job_type(job_type: &str) -> Option<Self> {
        match job_type {
            "text.script" => Some(Stage::TextScript),
            "director.storyboard" => Some(Stage::DirectorStoryboard),
            "image.generate" => Some(Stage::ImageGenerate),
            "lettering.apply" => Some(Stage::LetteringApply),
            "packaging.webtoon" => Some(Stage::PackagingWebtoon),
            _ => None,
        }
    }

    /// Short human name used in pipeline abort messages
    /// (e.g. "Image generation failed: ...").
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::TextScript => "Text",
            Stage::DirectorStoryboard => "Director",
            Stage::ImageGenerate => "Image",
            Stage::LetteringApply => "Lettering",
            Stage::PackagingWebtoon => "Packaging",
        }
    }

    /// HTTP timeout for this stage's engine call, in seconds.
    ///
    /// Image generation dominates; the others are bounded text/compositing
    /// work. The lettering timeout applies per image, not per job.
    pub fn timeout_secs(self) -> u64 {
        match self {
            Stage::TextScript => 120,
            Stage::DirectorStoryboard => 180,
            Stage::ImageGenerate => 300,
            Stage::LetteringApply => 120,
            Stage::PackagingWebtoon => 120,
        }
    }
}

/// Wall-clock budget for a whole five-stage pipeline run, in seconds.
pub const PIPELINE_TIMEOUT_SECS: u64 = 900;

// ---------------------------------------------------------------------------
// Cost model
// ---------------------------------------------------------------------------

/// Cost units charged per lettered panel (the lettering engine does not
/// report cost itself).
pub const LETTERING_COST_PER_PANEL: f64 = 0.10;

/// Flat cost units charged for packaging the final webtoon.
pub const PACKAGING_COST: f64 = 0.20;

/// Total lettering cost for `panel_count` lettered panels.
pub fn lettering_cost(panel_count: usize) -> f64 {
    panel_count as f64 * LETTERING_COST_PER_PANEL
}

// ---------------------------------------------------------------------------
// Request defaults
// ---------------------------------------------------------------------------

/// Target script length sent to the text engine.
pub const DEFAULT_TARGET_WORD_COUNT: u32 = 2000;

/// Default storyboard panel count when the caller does not specify one.
pub const DEFAULT_TARGET_PANELS: u32 = 10;

/// Generated panel image width in pixels.
pub const PANEL_WIDTH: u32 = 1024;

/// Generated panel image height in pixels (webtoon portrait ratio).
pub const PANEL_HEIGHT: u32 = 1448;

/// Dialogue font size passed to the lettering engine.
pub const LETTERING_FONT_SIZE: u32 = 32;

/// Vertical-scroll layout identifier for the packaging engine.
pub const PACKAGING_LAYOUT: &str = "vertical";

/// Pixel spacing between packaged panels.
pub const PACKAGING_SPACING: u32 = 20;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
