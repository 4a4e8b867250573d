use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;
use crate::infrastructure::llm::{build_client, make_snippet, validated_base};

/// Embeddings client for an OpenAI-compatible API
/// (`POST {endpoint}/v1/embeddings`).
///
/// Connectivity classification is reserved for the chat backend, so every
/// failure here is an ordinary external error.
pub struct OpenAiEmbedding {
    client: reqwest::Client,
    url: String,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedding {
    pub fn new(cfg: &EmbeddingConfig) -> Result<Self, DomainError> {
        let client = build_client(cfg.api_key.as_deref())?;
        let base = validated_base(&cfg.endpoint)?;

        Ok(Self {
            client,
            url: format!("{base}/v1/embeddings"),
            model: cfg.model.clone(),
            dimension: cfg.dimension,
        })
    }

    async fn request(&self, inputs: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let body = EmbeddingsRequest {
            model: &self.model,
            input: inputs,
        };

        debug!(model = %self.model, input_count = inputs.len(), "POST {}", self.url);

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("embeddings request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DomainError::external(format!(
                "embeddings backend returned {status}: {}",
                make_snippet(&text)
            )));
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            DomainError::external(format!("failed to decode embeddings response: {e}"))
        })?;

        if out.data.len() != inputs.len() {
            return Err(DomainError::external(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                out.data.len()
            )));
        }

        let mut data = out.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| Embedding::new(d.embedding)).collect())
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.request(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::internal("no embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}
