use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::LlmConfig;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends a single-turn completion, optionally with an image given as a
    /// `data:` or `https:` URL.
    async fn complete(
        &self,
        prompt: &str,
        image_url: Option<&str>,
    ) -> Result<String, LlmClientError>;

    /// Qualified model name used for routing.
    fn model_name(&self) -> &str;
}

pub trait LlmClientFactory: Send + Sync {
    fn create(&self, config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
