use serde::Deserialize;

use crate::domain::DomainError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub qdrant: QdrantConfig,
    pub rag: RagConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            llm: LlmConfig {
                endpoint: "https://api.openai.com".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: None,
            },
            embedding: EmbeddingConfig {
                endpoint: "https://api.openai.com".to_string(),
                model: "text-embedding-3-small".to_string(),
                api_key: None,
                dimension: 1536,
            },
            qdrant: QdrantConfig {
                url: "http://localhost:6334".to_string(),
                collection: "rag_documents".to_string(),
            },
            rag: RagConfig { top_k: 5 },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables where set.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| DomainError::validation("SERVER_PORT must be a valid u16"))?;
        }

        if let Ok(endpoint) = std::env::var("OPENAI_ENDPOINT") {
            config.llm.endpoint = endpoint.clone();
            config.embedding.endpoint = endpoint;
        }
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.llm.api_key = Some(api_key.clone());
            config.embedding.api_key = Some(api_key);
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(dimension) = std::env::var("EMBEDDING_DIMENSION") {
            config.embedding.dimension = dimension
                .parse()
                .map_err(|_| DomainError::validation("EMBEDDING_DIMENSION must be a number"))?;
        }

        if let Ok(url) = std::env::var("QDRANT_URL") {
            config.qdrant.url = url;
        }
        if let Ok(collection) = std::env::var("QDRANT_COLLECTION") {
            config.qdrant.collection = collection;
        }

        if let Ok(top_k) = std::env::var("RAG_TOP_K") {
            config.rag.top_k = top_k
                .parse()
                .map_err(|_| DomainError::validation("RAG_TOP_K must be a number"))?;
        }

        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }
}
