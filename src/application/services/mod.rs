mod answer;
mod ingest;

pub use answer::{AnswerService, CONNECTIVITY_FALLBACK, DEFAULT_TOP_K, PROCESSING_FALLBACK};
pub use ingest::IngestService;
