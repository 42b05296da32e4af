use markdown_gateway::application::ports::{ConversionContext, ConverterError, FileConverter};
use markdown_gateway::domain::{Document, DocumentFormat};
use markdown_gateway::infrastructure::conversion::PlainTextAdapter;

use super::write_input;

#[tokio::test]
async fn given_valid_utf8_file_when_converting_then_returns_text_verbatim() {
    let (_dir, path) = write_input("readme.txt", b"Hello, this is plain text.");
    let document = Document::new("readme.txt".to_string(), DocumentFormat::PlainText, 26);

    let result = PlainTextAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert_eq!(result.unwrap(), "Hello, this is plain text.");
}

#[tokio::test]
async fn given_byte_order_mark_when_converting_then_strips_it() {
    let (_dir, path) = write_input("data.json", "\u{feff}{\"a\":1}".as_bytes());
    let document = Document::new("data.json".to_string(), DocumentFormat::Json, 10);

    let result = PlainTextAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert_eq!(result.unwrap(), "{\"a\":1}");
}

#[tokio::test]
async fn given_invalid_utf8_when_converting_then_returns_extraction_failed() {
    let (_dir, path) = write_input("broken.txt", &[0xFF, 0xFE, 0xFD]);
    let document = Document::new("broken.txt".to_string(), DocumentFormat::PlainText, 3);

    let result = PlainTextAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_text_format_when_converting_then_returns_unsupported() {
    let (_dir, path) = write_input("file.pdf", b"some data");
    let document = Document::new("file.pdf".to_string(), DocumentFormat::Pdf, 9);

    let result = PlainTextAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::UnsupportedFormat(_))));
}
