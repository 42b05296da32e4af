use std::sync::Arc;

use crate::application::ports::FileConverter;
use crate::application::services::TempWorkspace;
use crate::domain::DocumentFormat;

use super::archive_adapter::ArchiveAdapter;
use super::composite_converter::CompositeConverter;
use super::csv_adapter::CsvAdapter;
use super::epub_adapter::EpubAdapter;
use super::html_adapter::HtmlAdapter;
use super::image_adapter::ImageAdapter;
use super::office_adapter::OfficeAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;
use super::spreadsheet_adapter::SpreadsheetAdapter;

pub struct ConverterFactory;

impl ConverterFactory {
    /// Every built-in adapter. Zip archives recurse into the same set, minus
    /// archives themselves.
    pub fn create(workspace: TempWorkspace) -> Arc<CompositeConverter> {
        let leaf = Self::leaf_adapters();
        let inner: Arc<dyn FileConverter> = Arc::new(CompositeConverter::new(leaf.clone()));

        let mut adapters = leaf;
        adapters.push((
            DocumentFormat::Zip,
            Arc::new(ArchiveAdapter::new(inner, workspace)),
        ));

        let converter = CompositeConverter::new(adapters);
        tracing::info!(formats = ?converter.formats(), "File converters registered");
        Arc::new(converter)
    }

    fn leaf_adapters() -> Vec<(DocumentFormat, Arc<dyn FileConverter>)> {
        let plain_text: Arc<dyn FileConverter> = Arc::new(PlainTextAdapter);
        let office: Arc<dyn FileConverter> = Arc::new(OfficeAdapter);

        let mut adapters: Vec<(DocumentFormat, Arc<dyn FileConverter>)> = PlainTextAdapter::FORMATS
            .into_iter()
            .map(|format| (format, Arc::clone(&plain_text)))
            .collect();
        adapters.push((DocumentFormat::Html, Arc::new(HtmlAdapter)));
        adapters.push((DocumentFormat::Csv, Arc::new(CsvAdapter)));
        adapters.push((DocumentFormat::Pdf, Arc::new(PdfAdapter::new())));
        adapters.push((DocumentFormat::Spreadsheet, Arc::new(SpreadsheetAdapter)));
        adapters.push((DocumentFormat::Docx, Arc::clone(&office)));
        adapters.push((DocumentFormat::Pptx, office));
        adapters.push((DocumentFormat::Epub, Arc::new(EpubAdapter)));
        adapters.push((DocumentFormat::Image, Arc::new(ImageAdapter)));
        adapters
    }
}
