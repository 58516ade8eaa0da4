//! Repository structs: one per table, static async methods over `PgPool`.

mod asset_repo;
mod episode_repo;
mod job_repo;
mod project_repo;

pub use asset_repo::AssetRepo;
pub use episode_repo::EpisodeRepo;
pub use job_repo::JobRepo;
pub use project_repo::ProjectRepo;
