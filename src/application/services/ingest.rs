use std::sync::Arc;
use tracing::instrument;

use crate::domain::{ports::VectorStore, split_into_documents, DomainError};

pub struct IngestService {
    vector_store: Arc<dyn VectorStore>,
    max_document_len: usize,
}

impl IngestService {
    pub fn new(vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            vector_store,
            max_document_len: 1000,
        }
    }

    pub fn with_max_document_len(mut self, max_document_len: usize) -> Self {
        self.max_document_len = max_document_len;
        self
    }

    /// Splits `content` on blank lines and indexes the resulting documents,
    /// each tagged with `source` in its metadata. Returns how many documents
    /// were added.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn ingest(&self, content: &str, source: &str) -> Result<usize, DomainError> {
        let documents: Vec<_> = split_into_documents(content, self.max_document_len)
            .into_iter()
            .map(|d| d.with_metadata(serde_json::json!({ "source": source })))
            .collect();
        if documents.is_empty() {
            return Ok(0);
        }

        self.vector_store.add_documents(&documents).await?;
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RetrievedDocument, StoredDocument};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        added: Mutex<Vec<StoredDocument>>,
    }

    #[async_trait]
    impl VectorStore for RecordingStore {
        async fn similarity_search(
            &self,
            _query: &str,
            _top_k: usize,
        ) -> Result<Vec<RetrievedDocument>, DomainError> {
            Ok(Vec::new())
        }

        async fn add_documents(&self, documents: &[StoredDocument]) -> Result<(), DomainError> {
            self.added.lock().unwrap().extend_from_slice(documents);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ingest_splits_and_indexes() {
        let store = Arc::new(RecordingStore::default());
        let svc = IngestService::new(store.clone()).with_max_document_len(20);

        let count = svc
            .ingest("First paragraph.\n\nSecond paragraph.", "notes.txt")
            .await
            .unwrap();

        assert_eq!(count, 2);
        let added = store.added.lock().unwrap();
        assert_eq!(added[0].content, "First paragraph.");
        assert_eq!(added[1].content, "Second paragraph.");
    }

    #[tokio::test]
    async fn test_ingest_tags_documents_with_source() {
        let store = Arc::new(RecordingStore::default());
        let svc = IngestService::new(store.clone());

        svc.ingest("Some content.", "seed.txt").await.unwrap();

        let added = store.added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(
            added[0].metadata,
            serde_json::json!({ "source": "seed.txt" })
        );
    }

    #[tokio::test]
    async fn test_ingest_empty_content_adds_nothing() {
        let store = Arc::new(RecordingStore::default());
        let svc = IngestService::new(store.clone());

        let count = svc.ingest("   \n\n  ", "empty.txt").await.unwrap();

        assert_eq!(count, 0);
        assert!(store.added.lock().unwrap().is_empty());
    }
}
