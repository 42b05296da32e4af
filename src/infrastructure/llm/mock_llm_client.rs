use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{LlmClient, LlmClientError, LlmClientFactory};
use crate::domain::LlmConfig;

/// Answers every prompt with a fixed reply and counts the calls.
pub struct MockLlmClient {
    model_name: String,
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(model_name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(model_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            reply: Err(error.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _prompt: &str,
        _image_url: Option<&str>,
    ) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(LlmClientError::ApiRequestFailed)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Creates [`MockLlmClient`]s replying with a fixed caption.
pub struct MockLlmClientFactory {
    reply: String,
}

impl MockLlmClientFactory {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for MockLlmClientFactory {
    fn default() -> Self {
        Self::new("Mock caption")
    }
}

impl LlmClientFactory for MockLlmClientFactory {
    fn create(&self, config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        Ok(Arc::new(MockLlmClient::new(
            config.qualified_model_name(),
            self.reply.clone(),
        )))
    }
}
