use std::sync::Arc;

use crate::domain::LlmProvider;

use super::LlmClient;

/// An immutable view of the LLM configuration at one point in time.
pub struct LlmSnapshot {
    pub version: u64,
    pub provider: LlmProvider,
    pub model_name: String,
    pub client: Arc<dyn LlmClient>,
}

/// Request-scoped inputs a converter may consult besides the document itself.
#[derive(Clone, Default)]
pub struct ConversionContext {
    pub llm: Option<Arc<LlmSnapshot>>,
}

impl ConversionContext {
    pub fn with_llm(llm: Option<Arc<LlmSnapshot>>) -> Self {
        Self { llm }
    }

    pub fn llm_client(&self) -> Option<&Arc<dyn LlmClient>> {
        self.llm.as_ref().map(|snapshot| &snapshot.client)
    }
}
