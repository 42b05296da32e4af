use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

use super::markdown_table::render_table;

/// Renders every worksheet as a `## name` section holding a Markdown table.
pub struct SpreadsheetAdapter;

impl SpreadsheetAdapter {
    fn workbook_to_markdown(data: Vec<u8>) -> Result<String, ConverterError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
            .map_err(|e| ConverterError::ExtractionFailed(format!("failed to open workbook: {e}")))?;

        let mut sections = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = match workbook.worksheet_range(&sheet_name) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!(sheet = %sheet_name, error = %e, "Skipping unreadable worksheet");
                    continue;
                }
            };

            let rows: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(cell_text).collect())
                .collect();

            let table = render_table(&rows);
            if table.is_empty() {
                sections.push(format!("## {sheet_name}"));
            } else {
                sections.push(format!("## {sheet_name}\n{table}"));
            }
        }

        Ok(sections.join("\n\n"))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}

#[async_trait]
impl FileConverter for SpreadsheetAdapter {
    #[tracing::instrument(skip(self, path, _context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Spreadsheet {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;
        tokio::task::spawn_blocking(move || Self::workbook_to_markdown(data))
            .await
            .map_err(|e| ConverterError::ExtractionFailed(format!("task join error: {e}")))?
    }
}
