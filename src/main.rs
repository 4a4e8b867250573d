use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rag_answer::api::{create_router, AppState};
use rag_answer::application::{AnswerService, IngestService};
use rag_answer::domain::Prompts;
use rag_answer::infrastructure::{Config, OpenAiChatModel, OpenAiEmbedding, QdrantVectorStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let chat_model = Arc::new(OpenAiChatModel::new(&config.llm)?);
    let embedder = Arc::new(OpenAiEmbedding::new(&config.embedding)?);
    let vector_store = Arc::new(
        QdrantVectorStore::new(&config.qdrant.url, &config.qdrant.collection, embedder).await?,
    );
    info!(
        url = %config.qdrant.url,
        collection = %config.qdrant.collection,
        "vector store initialized"
    );

    let prompts = Prompts::embedded();
    let answer_service = Arc::new(
        AnswerService::new(chat_model, vector_store.clone(), prompts).with_top_k(config.rag.top_k),
    );
    let ingest_service = Arc::new(IngestService::new(vector_store));

    if let Ok(path) = std::env::var("SEED_PATH") {
        let content = std::fs::read_to_string(&path)?;
        let indexed = ingest_service.ingest(&content, &path).await?;
        info!(path = %path, indexed, "seeded vector store");
    }

    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::new(answer_service, ingest_service, Arc::new(config));
    let app = create_router(state);

    let addr = SocketAddr::new(host.parse()?, port);
    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
