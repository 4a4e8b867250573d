use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    pub content: String,
    pub metadata: serde_json::Value,
}

impl StoredDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// One similarity-search hit. Only `content` feeds the prompt; `score` and
/// `metadata` are carried through for callers that want them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub score: f32,
    pub metadata: serde_json::Value,
}

/// Splits raw text into documents on blank-line boundaries.
///
/// Consecutive paragraphs are merged until they would exceed `max_len`,
/// then a new document starts. Whitespace-only paragraphs are skipped.
pub fn split_into_documents(content: &str, max_len: usize) -> Vec<StoredDocument> {
    let paragraphs: Vec<&str> = content
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut documents = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        let would_exceed = !current.is_empty() && current.len() + paragraph.len() + 2 > max_len;

        if would_exceed {
            documents.push(StoredDocument::new(&current));
            current.clear();
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    if !current.is_empty() {
        documents.push(StoredDocument::new(current));
    }

    documents
}
