use std::path::Path;

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use serde_json::json;

use crate::domain::{ArchiveRecord, BatchItem};

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Serves Markdown from memory as a `.md` attachment.
pub fn markdown_attachment(markdown: String, stem: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}.md\"", attachment_stem(stem));
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"output.md\""));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(MARKDOWN_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        markdown,
    )
        .into_response()
}

/// The upload's file stem restricted to header-safe characters.
fn attachment_stem(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        "output".to_string()
    } else {
        cleaned.to_string()
    }
}

/// A streamed result that can name the input it belongs to.
pub trait NdjsonRecord: Serialize {
    fn filename(&self) -> Option<&str>;
}

impl NdjsonRecord for BatchItem {
    fn filename(&self) -> Option<&str> {
        match self {
            Self::Converted(out) => out.filename.as_deref(),
            Self::Failed { filename, .. } => filename.as_deref(),
        }
    }
}

impl NdjsonRecord for ArchiveRecord {
    fn filename(&self) -> Option<&str> {
        Some(ArchiveRecord::filename(self))
    }
}

/// One JSON line per record. A record that cannot be serialized still gets
/// a `{filename, error}` line.
pub fn ndjson_line<T: NdjsonRecord>(record: &T) -> String {
    let mut line = serde_json::to_string(record).unwrap_or_else(|e| {
        tracing::error!(filename = ?record.filename(), error = %e, "Failed to serialize NDJSON record");
        json!({
            "filename": record.filename(),
            "error": format!("failed to serialize result: {e}"),
        })
        .to_string()
    });
    line.push('\n');
    line
}

/// Streams each record as one JSON line.
pub fn ndjson_response<S, T>(records: S) -> Response
where
    S: Stream<Item = T> + Send + 'static,
    T: NdjsonRecord + Send + 'static,
{
    let body = records.map(|record| Ok::<_, std::convert::Infallible>(ndjson_line(&record)));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(body),
    )
        .into_response()
}
