use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

/// Passes UTF-8 text formats through unchanged.
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    pub const FORMATS: [DocumentFormat; 4] = [
        DocumentFormat::PlainText,
        DocumentFormat::Markdown,
        DocumentFormat::Json,
        DocumentFormat::Xml,
    ];
}

#[async_trait]
impl FileConverter for PlainTextAdapter {
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if !Self::FORMATS.contains(&document.format) {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;
        let text = String::from_utf8(data).map_err(|e| {
            ConverterError::ExtractionFailed(format!("{} is not valid UTF-8: {e}", document.filename))
        })?;

        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}
