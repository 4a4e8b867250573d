use std::sync::Arc;
use tracing::{error, instrument};

use crate::domain::{
    ports::{ChatModel, VectorStore},
    Answer, DomainError, PromptMessage, Prompts, Question,
};

/// Returned when the chat backend cannot be reached at the network level.
pub const CONNECTIVITY_FALLBACK: &str =
    "Sorry, I'm currently unable to connect to the AI service. Please try again later.";

/// Returned for every other failure in the pipeline.
pub const PROCESSING_FALLBACK: &str =
    "An error occurred while processing your question. Please try again later.";

pub const DEFAULT_TOP_K: usize = 5;

/// Answers a question by retrieving context from the vector store, filling
/// the RAG prompt, and calling the chat backend.
///
/// `get_answer` never fails: every error is logged and mapped to one of the
/// two fixed fallback answers.
pub struct AnswerService {
    chat_model: Arc<dyn ChatModel>,
    vector_store: Arc<dyn VectorStore>,
    prompts: Prompts,
    top_k: usize,
}

impl AnswerService {
    pub fn new(
        chat_model: Arc<dyn ChatModel>,
        vector_store: Arc<dyn VectorStore>,
        prompts: Prompts,
    ) -> Self {
        Self {
            chat_model,
            vector_store,
            prompts,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    #[instrument(skip(self, question), fields(question_len = question.question.len()))]
    pub async fn get_answer(&self, question: &Question) -> Answer {
        match self.resolve(question).await {
            Ok(text) => Answer::new(text),
            Err(e) if e.is_connectivity() => {
                error!(error = %e, "failed to connect to the AI service");
                Answer::new(CONNECTIVITY_FALLBACK)
            }
            Err(e) => {
                error!(error = %e, "error processing question");
                Answer::new(PROCESSING_FALLBACK)
            }
        }
    }

    async fn resolve(&self, question: &Question) -> Result<String, DomainError> {
        let system_message = self.prompts.system.render(&[])?;

        let documents = self
            .vector_store
            .similarity_search(&question.question, self.top_k)
            .await?;

        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let user_message = self.prompts.rag.render(&[
            ("input", question.question.as_str()),
            ("documents", context.as_str()),
        ])?;

        let messages = [
            PromptMessage::system(system_message),
            PromptMessage::user(user_message),
        ];

        self.chat_model.call(&messages).await
    }
}
