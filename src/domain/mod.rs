mod document;
mod llm_provider;
mod markdown_out;
mod text_snippet;

pub use document::{Document, DocumentFormat};
pub use llm_provider::{LlmConfig, LlmProvider};
pub use markdown_out::{ArchiveRecord, BatchItem, FILE_SOURCE, MarkdownOut, TEXT_SOURCE};
pub use text_snippet::{SnippetSelectionError, TextSnippet};
