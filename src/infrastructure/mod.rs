pub mod config;
pub mod embedding;
pub mod llm;
pub mod vector_store;

pub use config::{Config, EmbeddingConfig, LlmConfig, QdrantConfig, RagConfig, ServerConfig};
pub use embedding::OpenAiEmbedding;
pub use llm::OpenAiChatModel;
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};
