//! In-process domain events.

pub mod bus;

pub use bus::{
    DomainEvent, EventBus, EPISODE_ACTIVATED, EPISODE_DEACTIVATED, PIPELINE_COMPLETED,
    PIPELINE_FAILED,
};
