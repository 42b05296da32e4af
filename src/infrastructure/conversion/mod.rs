mod archive_adapter;
mod composite_converter;
mod converter_factory;
mod csv_adapter;
mod epub_adapter;
mod html_adapter;
mod image_adapter;
mod markdown_table;
mod mock_converter;
mod office_adapter;
mod pdf_adapter;
mod plain_text_adapter;
mod spreadsheet_adapter;
mod text_sanitizer;
mod web_page_converter;
mod xml_text;
mod youtube;

pub use archive_adapter::ArchiveAdapter;
pub use composite_converter::CompositeConverter;
pub use converter_factory::ConverterFactory;
pub use csv_adapter::CsvAdapter;
pub use epub_adapter::EpubAdapter;
pub use html_adapter::{HtmlAdapter, html_to_markdown};
pub use image_adapter::ImageAdapter;
pub use markdown_table::render_table;
pub use mock_converter::MockConverter;
pub use office_adapter::OfficeAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use spreadsheet_adapter::SpreadsheetAdapter;
pub use text_sanitizer::sanitize_extracted_text;
pub use web_page_converter::WebPageConverter;
pub use youtube::{is_watch_page, render_watch_page};
