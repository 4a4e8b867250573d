mod chat_model;
mod embedding;
mod vector_store;

pub use chat_model::ChatModel;
pub use embedding::EmbeddingService;
pub use vector_store::VectorStore;
