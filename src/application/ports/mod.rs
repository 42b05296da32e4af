mod conversion_context;
mod file_converter;
mod llm_client;
mod url_converter;

pub use conversion_context::{ConversionContext, LlmSnapshot};
pub use file_converter::{ConverterError, FileConverter};
pub use llm_client::{LlmClient, LlmClientError, LlmClientFactory};
pub use url_converter::{UrlConversion, UrlConverter};
