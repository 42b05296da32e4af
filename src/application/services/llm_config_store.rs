use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::application::ports::{LlmClientFactory, LlmSnapshot};
use crate::domain::LlmConfig;

use super::ConversionError;

/// Process-wide LLM configuration, replaced wholesale on every update.
///
/// Readers take an `Arc` snapshot, so a conversion sees one configuration
/// from start to finish even if it is replaced concurrently.
pub struct LlmConfigStore {
    factory: Arc<dyn LlmClientFactory>,
    current: RwLock<Option<Arc<LlmSnapshot>>>,
    version: AtomicU64,
}

impl LlmConfigStore {
    pub fn new(factory: Arc<dyn LlmClientFactory>) -> Self {
        Self {
            factory,
            current: RwLock::new(None),
            version: AtomicU64::new(0),
        }
    }

    /// Validates `config`, builds a client for it and installs it.
    ///
    /// On any error the previously installed configuration stays in place.
    #[tracing::instrument(skip(self, config), fields(provider = %config.provider, model = %config.model))]
    pub async fn configure(&self, config: LlmConfig) -> Result<Arc<LlmSnapshot>, ConversionError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(ConversionError::Configuration(
                "api_key must not be empty".to_string(),
            ));
        }
        if config.model.trim().is_empty() {
            return Err(ConversionError::Configuration(
                "model must not be empty".to_string(),
            ));
        }

        let client = self.factory.create(&config).map_err(|e| {
            ConversionError::Configuration(format!("Failed to configure LLM: {e}"))
        })?;

        let mut current = self.current.write().await;
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(LlmSnapshot {
            version,
            provider: config.provider,
            model_name: client.model_name().to_string(),
            client,
        });
        *current = Some(Arc::clone(&snapshot));

        tracing::info!(
            version,
            model_name = %snapshot.model_name,
            "LLM client configured"
        );

        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> Option<Arc<LlmSnapshot>> {
        self.current.read().await.clone()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
