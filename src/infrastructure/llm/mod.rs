mod llm_client_factory;
mod mock_llm_client;
mod routed_llm_client;

pub use llm_client_factory::{RoutedLlmClientFactory, default_base_url};
pub use mock_llm_client::{MockLlmClient, MockLlmClientFactory};
pub use routed_llm_client::RoutedLlmClient;
