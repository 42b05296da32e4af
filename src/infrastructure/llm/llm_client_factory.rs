use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::application::ports::{LlmClient, LlmClientError, LlmClientFactory};
use crate::domain::{LlmConfig, LlmProvider};

use super::routed_llm_client::RoutedLlmClient;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub fn default_base_url(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => "https://api.openai.com/v1",
        LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        LlmProvider::Groq => "https://api.groq.com/openai/v1",
        LlmProvider::Claude => "https://api.anthropic.com/v1",
    }
}

/// Builds [`RoutedLlmClient`]s that share one connection pool.
pub struct RoutedLlmClientFactory {
    client: Client,
    base_urls: HashMap<LlmProvider, String>,
}

impl RoutedLlmClientFactory {
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()
            .map_err(|e| LlmClientError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            base_urls: HashMap::new(),
        })
    }

    pub fn with_base_url(mut self, provider: LlmProvider, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(provider, base_url.into());
        self
    }

    pub fn base_url(&self, provider: LlmProvider) -> &str {
        self.base_urls
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| default_base_url(provider))
    }
}

impl LlmClientFactory for RoutedLlmClientFactory {
    fn create(&self, config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        let base_url = self.base_url(config.provider);
        reqwest::Url::parse(base_url).map_err(|e| {
            LlmClientError::InvalidConfiguration(format!("invalid base url '{base_url}': {e}"))
        })?;

        let model_name = config.qualified_model_name();
        tracing::info!(provider = %config.provider, model = %model_name, base_url, "Creating LLM client");

        Ok(Arc::new(RoutedLlmClient::new(
            self.client.clone(),
            config.provider,
            base_url,
            config.api_key.clone(),
            model_name,
        )))
    }
}
