use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

use super::markdown_table::render_table;

/// Renders comma-separated values as a Markdown table.
pub struct CsvAdapter;

impl CsvAdapter {
    pub fn to_markdown(data: &[u8]) -> Result<String, ConverterError> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record
                .map_err(|e| ConverterError::ExtractionFailed(format!("invalid CSV: {e}")))?;
            rows.push(
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect::<Vec<_>>(),
            );
        }

        Ok(render_table(&rows))
    }
}

#[async_trait]
impl FileConverter for CsvAdapter {
    #[tracing::instrument(skip(self, path, _context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Csv {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;
        Self::to_markdown(&data)
    }
}
