//! Application layer - Use cases and orchestration.
//!
//! Services here orchestrate domain logic through domain ports (traits)
//! rather than concrete infrastructure.

pub mod services;

pub use services::{
    AnswerService, IngestService, CONNECTIVITY_FALLBACK, DEFAULT_TOP_K, PROCESSING_FALLBACK,
};
