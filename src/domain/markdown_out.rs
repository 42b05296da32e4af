use serde::{Deserialize, Serialize};

pub const FILE_SOURCE: &str = "file";
pub const TEXT_SOURCE: &str = "text";

/// The structured result every conversion endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOut {
    pub markdown: String,
    pub source: Option<String>,
    pub filename: Option<String>,
    pub bytes: Option<u64>,
    pub content_type: Option<String>,
}

impl MarkdownOut {
    pub fn from_upload(
        markdown: String,
        filename: Option<String>,
        bytes: u64,
        content_type: Option<String>,
    ) -> Self {
        Self {
            markdown,
            source: Some(FILE_SOURCE.to_string()),
            filename,
            bytes: Some(bytes),
            content_type,
        }
    }

    pub fn from_url(markdown: String, url: &str, content_type: Option<String>) -> Self {
        Self {
            markdown,
            source: Some(url.to_string()),
            filename: None,
            bytes: None,
            content_type,
        }
    }
}

/// One entry of a multi-file conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    Converted(MarkdownOut),
    Failed {
        filename: Option<String>,
        error: String,
    },
}

impl BatchItem {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// One line of an archive conversion stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArchiveRecord {
    Converted { filename: String, markdown: String },
    Failed { filename: String, error: String },
}

impl ArchiveRecord {
    pub fn filename(&self) -> &str {
        match self {
            Self::Converted { filename, .. } | Self::Failed { filename, .. } => filename,
        }
    }
}
