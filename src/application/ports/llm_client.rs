use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

pub type LlmTokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmClientError>> + Send>>;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Starts a streamed generation; items are text fragments in arrival order.
    async fn complete_stream(&self, prompt: &str) -> Result<LlmTokenStream, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
