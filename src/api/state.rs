use std::sync::Arc;

use crate::application::{AnswerService, IngestService};
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    pub ingest_service: Arc<IngestService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        answer_service: Arc<AnswerService>,
        ingest_service: Arc<IngestService>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            answer_service,
            ingest_service,
            config,
        }
    }
}
