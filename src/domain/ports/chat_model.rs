use crate::domain::{errors::DomainError, PromptMessage};
use async_trait::async_trait;

/// Chat-completion backend. One request, one response, no streaming.
///
/// Implementations must report network-level unreachability of the backend
/// as `DomainError::Connectivity`; every other failure (bad status, decode
/// error, empty result) maps to a different variant.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn call(&self, messages: &[PromptMessage]) -> Result<String, DomainError>;
}
