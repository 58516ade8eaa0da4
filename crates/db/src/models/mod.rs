//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Status lookup enums live in [`status`]

pub mod asset;
pub mod episode;
pub mod job;
pub mod project;
pub mod status;
