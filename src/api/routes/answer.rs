use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::domain::Question;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Always responds 200 with an answer body; failures inside the pipeline
/// surface as the service's fallback messages, never as an error status.
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let question = Question::new(request.question);
    let answer = state.answer_service.get_answer(&question).await;

    Json(AskResponse {
        answer: answer.answer,
    })
}
