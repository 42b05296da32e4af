use std::path::Path;

use async_trait::async_trait;

use crate::domain::Document;

use super::ConversionContext;

/// Turns a file on disk into Markdown.
#[async_trait]
pub trait FileConverter: Send + Sync {
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        context: &ConversionContext,
    ) -> Result<String, ConverterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
