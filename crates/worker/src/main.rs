//! Generation worker: claims queued jobs from Postgres and drives them
//! through the pipeline orchestrator against the external engines.

use std::sync::Arc;

use inkforge_core::retry::RetryPolicy;
use inkforge_engines::{EngineConfig, HttpEngineClient};
use inkforge_events::EventBus;
use inkforge_pipeline::{
    Dispatcher, EpisodeProjector, PgStore, PipelineSequencer, PipelineStore, PollConfig,
    StageExecutor,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("inkforge_worker=debug,inkforge_pipeline=debug,inkforge_db=info")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = inkforge_db::create_pool(&database_url).await?;
    inkforge_db::health_check(&pool).await?;
    tracing::info!("Database connection established");

    let engine_config = EngineConfig::from_env();
    tracing::info!(?engine_config, "Engine endpoints configured");

    let store: Arc<dyn PipelineStore> = Arc::new(PgStore::new(pool));
    let engine = Arc::new(HttpEngineClient::new(engine_config));
    let events = Arc::new(EventBus::default());

    let projector = EpisodeProjector::new(store.clone(), events.clone());
    let executor = StageExecutor::new(
        store.clone(),
        engine,
        projector.clone(),
        RetryPolicy::default(),
    );
    let sequencer = PipelineSequencer::new(
        store.clone(),
        executor.clone(),
        projector,
        PollConfig::default(),
        events,
    );
    let dispatcher = Dispatcher::new(store, executor, sequencer);

    dispatcher.run().await;
    Ok(())
}
