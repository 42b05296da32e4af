use serde_json::json;

use markdown_gateway::domain::{ArchiveRecord, BatchItem, MarkdownOut};

#[test]
fn given_upload_result_when_serialized_then_carries_file_source_and_size() {
    let out = MarkdownOut::from_upload(
        "# Hi".to_string(),
        Some("hi.md".to_string()),
        4,
        Some("text/markdown".to_string()),
    );

    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({
            "markdown": "# Hi",
            "source": "file",
            "filename": "hi.md",
            "bytes": 4,
            "content_type": "text/markdown"
        })
    );
}

#[test]
fn given_url_result_when_serialized_then_source_is_the_url() {
    let out = MarkdownOut::from_url("text".to_string(), "https://example.com/", None);

    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["source"], "https://example.com/");
    assert_eq!(value["bytes"], serde_json::Value::Null);
}

#[test]
fn given_failed_batch_item_when_serialized_then_has_filename_and_error_only() {
    let item = BatchItem::Failed {
        filename: Some("x.bin".to_string()),
        error: "unsupported".to_string(),
    };

    assert!(!item.is_converted());
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({"filename": "x.bin", "error": "unsupported"})
    );
}

#[test]
fn given_archive_records_when_serialized_then_match_line_shapes() {
    let converted = ArchiveRecord::Converted {
        filename: "a.txt".to_string(),
        markdown: "a".to_string(),
    };
    let failed = ArchiveRecord::Failed {
        filename: "b.bin".to_string(),
        error: "nope".to_string(),
    };

    assert_eq!(converted.filename(), "a.txt");
    assert_eq!(
        serde_json::to_value(&converted).unwrap(),
        json!({"filename": "a.txt", "markdown": "a"})
    );
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"filename": "b.bin", "error": "nope"})
    );
}
