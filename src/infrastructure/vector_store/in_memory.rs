use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::{
    ports::{EmbeddingService, VectorStore},
    DomainError, Embedding, RetrievedDocument, StoredDocument,
};

pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingService>,
    documents: RwLock<Vec<(StoredDocument, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new(embedder: Arc<dyn EmbeddingService>) -> Self {
        Self {
            embedder,
            documents: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let query_embedding = self.embedder.embed(query).await?;

        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<RetrievedDocument> = store
            .iter()
            .map(|(document, embedding)| RetrievedDocument {
                content: document.content.clone(),
                score: query_embedding.cosine_similarity(embedding),
                metadata: document.metadata.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(top_k);
        Ok(results)
    }

    async fn add_documents(&self, documents: &[StoredDocument]) -> Result<(), DomainError> {
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        for (document, embedding) in documents.iter().zip(embeddings.into_iter()) {
            store.retain(|(d, _)| d.id != document.id);
            store.push((document.clone(), embedding));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl FixedEmbedder {
        fn new(entries: &[(&str, &[f32])]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingService for FixedEmbedder {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            self.vectors
                .get(text)
                .cloned()
                .map(Embedding::new)
                .ok_or_else(|| DomainError::internal(format!("no fixture for `{text}`")))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            3
        }
    }

    #[tokio::test]
    async fn test_add_and_search_ranks_by_similarity() {
        let embedder = Arc::new(FixedEmbedder::new(&[
            ("apples", &[1.0, 0.0, 0.0]),
            ("oranges", &[0.0, 1.0, 0.0]),
            ("fruit?", &[0.9, 0.1, 0.0]),
        ]));
        let store = InMemoryVectorStore::new(embedder);

        store
            .add_documents(&[
                StoredDocument::new("apples"),
                StoredDocument::new("oranges"),
            ])
            .await
            .unwrap();

        let results = store.similarity_search("fruit?", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "apples");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_search_respects_top_k() {
        let embedder = Arc::new(FixedEmbedder::new(&[
            ("a", &[1.0, 0.0, 0.0]),
            ("b", &[0.8, 0.2, 0.0]),
            ("c", &[0.5, 0.5, 0.0]),
            ("q", &[1.0, 0.0, 0.0]),
        ]));
        let store = InMemoryVectorStore::new(embedder);

        store
            .add_documents(&[
                StoredDocument::new("a"),
                StoredDocument::new("b"),
                StoredDocument::new("c"),
            ])
            .await
            .unwrap();

        let results = store.similarity_search("q", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "a");
    }

    #[tokio::test]
    async fn test_search_empty_store_returns_nothing() {
        let embedder = Arc::new(FixedEmbedder::new(&[("q", &[1.0, 0.0, 0.0])]));
        let store = InMemoryVectorStore::new(embedder);

        let results = store.similarity_search("q", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_document_id() {
        let embedder = Arc::new(FixedEmbedder::new(&[
            ("old", &[1.0, 0.0, 0.0]),
            ("new", &[0.0, 1.0, 0.0]),
            ("q", &[0.0, 1.0, 0.0]),
        ]));
        let store = InMemoryVectorStore::new(embedder);

        let mut doc = StoredDocument::new("old");
        store.add_documents(std::slice::from_ref(&doc)).await.unwrap();

        doc.content = "new".to_string();
        store.add_documents(std::slice::from_ref(&doc)).await.unwrap();

        let results = store.similarity_search("q", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "new");
    }
}
