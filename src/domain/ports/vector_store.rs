use crate::domain::{errors::DomainError, RetrievedDocument, StoredDocument};
use async_trait::async_trait;

/// Vector similarity search over stored documents. Query embedding is the
/// store's concern, as is any relevance threshold; results come back most
/// similar first, at most `top_k` of them.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError>;

    async fn add_documents(&self, documents: &[StoredDocument]) -> Result<(), DomainError>;
}
