use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

use super::text_sanitizer::sanitize_extracted_text;

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileConverter for PdfAdapter {
    #[tracing::instrument(
        skip(self, path, _context),
        fields(filename = %document.filename, size_bytes = document.size_bytes)
    )]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Pdf {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;

        // pdf-extract panics on some malformed inputs; the join error catches it.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| ConverterError::ExtractionFailed(format!("PDF extraction aborted: {e}")))?
            .map_err(|e| ConverterError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let markdown = sanitize_extracted_text(&text);
        tracing::info!(chars = markdown.len(), "PDF text extraction complete");

        Ok(markdown)
    }
}
