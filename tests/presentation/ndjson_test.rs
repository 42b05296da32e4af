use serde::{Serialize, Serializer, ser};

use markdown_gateway::domain::{ArchiveRecord, BatchItem};
use markdown_gateway::presentation::handlers::{NdjsonRecord, ndjson_line};

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(ser::Error::custom("boom"))
    }
}

impl NdjsonRecord for Unserializable {
    fn filename(&self) -> Option<&str> {
        Some("broken.bin")
    }
}

#[test]
fn given_record_when_rendering_line_then_emits_one_json_line() {
    let record = ArchiveRecord::Converted {
        filename: "a.txt".to_string(),
        markdown: "alpha".to_string(),
    };

    let line = ndjson_line(&record);

    assert_eq!(line, "{\"filename\":\"a.txt\",\"markdown\":\"alpha\"}\n");
}

#[test]
fn given_unserializable_record_when_rendering_line_then_emits_error_line_with_filename() {
    let line = ndjson_line(&Unserializable);

    assert!(line.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(value["filename"], "broken.bin");
    assert!(value["error"].as_str().unwrap().contains("boom"));
}

#[test]
fn given_failed_batch_item_when_naming_then_uses_its_filename() {
    let item = BatchItem::Failed {
        filename: Some("x.pdf".to_string()),
        error: "bad".to_string(),
    };

    assert_eq!(NdjsonRecord::filename(&item), Some("x.pdf"));
}
