use markdown_gateway::application::ports::{ConversionContext, FileConverter};
use markdown_gateway::domain::{Document, DocumentFormat};
use markdown_gateway::infrastructure::conversion::{CsvAdapter, render_table};

use super::write_input;

#[test]
fn given_simple_csv_when_rendering_then_produces_header_separator_and_rows() {
    let markdown = CsvAdapter::to_markdown(b"a,b\n1,2").unwrap();

    assert_eq!(markdown, "| a | b |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn given_ragged_rows_when_rendering_then_pads_to_widest_row() {
    let markdown = CsvAdapter::to_markdown(b"h1,h2\nonly\nx,y,z").unwrap();

    assert_eq!(
        markdown,
        "| h1 | h2 |  |\n| --- | --- | --- |\n| only |  |  |\n| x | y | z |"
    );
}

#[test]
fn given_quoted_cells_with_pipes_and_newlines_when_rendering_then_escapes_them() {
    let markdown = CsvAdapter::to_markdown(b"name,note\n\"a|b\",\"line1\nline2\"").unwrap();

    assert!(markdown.contains("| a\\|b | line1<br>line2 |"));
}

#[test]
fn given_empty_input_when_rendering_then_returns_empty_string() {
    assert_eq!(CsvAdapter::to_markdown(b"").unwrap(), "");
    assert_eq!(render_table(&[]), "");
}

#[tokio::test]
async fn given_csv_file_with_bom_when_converting_then_header_is_clean() {
    let (_dir, path) = write_input("t.csv", "\u{feff}col\nval".as_bytes());
    let document = Document::new("t.csv".to_string(), DocumentFormat::Csv, 10);

    let markdown = CsvAdapter
        .convert_file(&path, &document, &ConversionContext::default())
        .await
        .unwrap();

    assert!(markdown.starts_with("| col |"));
}
