use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    ports::{EmbeddingService, VectorStore},
    DomainError, RetrievedDocument, StoredDocument,
};

/// Qdrant-backed vector store. Owns query embedding: callers search by
/// plain text, the configured `EmbeddingService` turns it into a vector.
pub struct QdrantVectorStore {
    client: Qdrant,
    embedder: Arc<dyn EmbeddingService>,
    collection: String,
}

impl QdrantVectorStore {
    pub async fn new(
        url: &str,
        collection: &str,
        embedder: Arc<dyn EmbeddingService>,
    ) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let store = Self {
            client,
            embedder,
            collection: collection.to_string(),
        };

        store.ensure_collection().await?;

        Ok(store)
    }

    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(
                            self.embedder.dimension() as u64,
                            Distance::Cosine,
                        ),
                    ),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        Ok(())
    }

    fn uuid_to_point_id(id: Uuid) -> u64 {
        let bytes = id.as_bytes();
        u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let embedding = self.embedder.embed(query).await?;

        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection,
                    embedding.as_slice().to_vec(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let documents = results
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;
                let content = payload.get("content")?.as_str()?.to_string();
                let metadata = payload
                    .get("metadata_json")
                    .and_then(|v| v.as_str())
                    .and_then(|s| serde_json::from_str(s).ok())
                    .unwrap_or_else(|| serde_json::json!({}));

                Some(RetrievedDocument {
                    content,
                    score: point.score,
                    metadata,
                })
            })
            .collect();

        Ok(documents)
    }

    async fn add_documents(&self, documents: &[StoredDocument]) -> Result<(), DomainError> {
        if documents.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut points = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.iter().zip(embeddings.iter()) {
            let payload: Payload = serde_json::json!({
                "document_id": document.id.to_string(),
                "content": document.content,
                "metadata_json": document.metadata.to_string(),
            })
            .try_into()
            .map_err(|_| DomainError::internal("Failed to create payload"))?;

            points.push(PointStruct::new(
                Self::uuid_to_point_id(document.id),
                embedding.as_slice().to_vec(),
                payload,
            ));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(())
    }
}
