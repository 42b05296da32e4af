use markdown_gateway::application::ports::{ConversionContext, ConverterError, FileConverter};
use markdown_gateway::domain::{Document, DocumentFormat};
use markdown_gateway::infrastructure::conversion::EpubAdapter;

use crate::support::zip_bytes;

use super::write_input;

const CONTAINER_XML: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

const CONTENT_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="id">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="id">urn:uuid:1234</dc:identifier>
    <dc:title>Sample &amp; Book</dc:title>
    <dc:creator>Ann Author</dc:creator>
    <dc:creator>Bob Writer</dc:creator>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="css" href="style.css" media-type="text/css"/>
    <item id="ch2" href="text/ch2.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch1" href="text/ch1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="ch1"/>
    <itemref idref="ch2"/>
  </spine>
</package>"#;

fn chapter(heading: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>{heading}</title></head>
<body><h1>{heading}</h1><p>{body}</p></body></html>"#
    )
}

fn book() -> Vec<u8> {
    let ch1 = chapter("Chapter One", "First text.");
    let ch2 = chapter("Chapter Two", "Second text.");
    zip_bytes(&[
        ("mimetype", b"application/epub+zip"),
        ("META-INF/container.xml", CONTAINER_XML.as_bytes()),
        ("OEBPS/content.opf", CONTENT_OPF.as_bytes()),
        ("OEBPS/style.css", b"p { margin: 0 }"),
        ("OEBPS/text/ch2.xhtml", ch2.as_bytes()),
        ("OEBPS/text/ch1.xhtml", ch1.as_bytes()),
    ])
}

#[tokio::test]
async fn given_epub_when_converting_then_renders_metadata_and_chapters_in_spine_order() {
    let (_dir, path) = write_input("book.epub", &book());
    let document = Document::new("book.epub".to_string(), DocumentFormat::Epub, 0);

    let markdown = EpubAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await
        .unwrap();

    assert!(markdown.starts_with(
        "**Title:** Sample & Book\n**Authors:** Ann Author, Bob Writer\n**Language:** en"
    ));
    let first = markdown.find("First text.").unwrap();
    let second = markdown.find("Second text.").unwrap();
    assert!(markdown.find("Chapter One").unwrap() < first);
    assert!(first < second);
    assert!(!markdown.contains("margin"));
}

#[tokio::test]
async fn given_zip_without_container_when_converting_then_extraction_fails() {
    let package = zip_bytes(&[("mimetype", b"application/epub+zip")]);
    let (_dir, path) = write_input("broken.epub", &package);
    let document = Document::new("broken.epub".to_string(), DocumentFormat::Epub, 0);

    let result = EpubAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_epub_format_when_converting_then_returns_unsupported() {
    let (_dir, path) = write_input("a.txt", b"text");
    let document = Document::new("a.txt".to_string(), DocumentFormat::PlainText, 4);

    let result = EpubAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::UnsupportedFormat(_))));
}
