//! Engine endpoint configuration.
//!
//! Loaded once at startup and passed to the HTTP client at construction;
//! executors never read the environment at call time.

/// Base URLs for the five generation engines.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Text engine (script generation).
    pub text_url: String,
    /// Director engine (storyboard generation).
    pub director_url: String,
    /// Image engine (batch panel rendering).
    pub image_url: String,
    /// Lettering engine (dialogue compositing).
    pub lettering_url: String,
    /// Packaging engine (final webtoon assembly).
    pub packaging_url: String,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `AI_TEXT_ENGINE_URL`      | `http://localhost:8001`  |
    /// | `AI_DIRECTOR_ENGINE_URL`  | `http://localhost:8002`  |
    /// | `AI_IMAGE_ENGINE_URL`     | `http://localhost:8003`  |
    /// | `AI_LETTERING_ENGINE_URL` | `http://localhost:8004`  |
    /// | `AI_PACKAGING_ENGINE_URL` | `http://localhost:8005`  |
    pub fn from_env() -> Self {
        Self {
            text_url: env_or("AI_TEXT_ENGINE_URL", "http://localhost:8001"),
            director_url: env_or("AI_DIRECTOR_ENGINE_URL", "http://localhost:8002"),
            image_url: env_or("AI_IMAGE_ENGINE_URL", "http://localhost:8003"),
            lettering_url: env_or("AI_LETTERING_ENGINE_URL", "http://localhost:8004"),
            packaging_url: env_or("AI_PACKAGING_ENGINE_URL", "http://localhost:8005"),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
