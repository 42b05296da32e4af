mod conversion_error;
mod conversion_service;
mod llm_config_store;
mod temp_workspace;

pub use conversion_error::ConversionError;
pub use conversion_service::{ConversionService, Upload, parse_remote_url};
pub use llm_config_store::LlmConfigStore;
pub use temp_workspace::{
    ARTIFACT_PREFIX, TempArtifact, TempWorkspace, artifact_suffix, extension_suffix,
};
