use axum::Json;
use serde::Serialize;

use crate::domain::DocumentFormat;

#[derive(Serialize)]
pub struct FormatEntry {
    pub format: &'static str,
    pub extensions: &'static [&'static str],
}

#[derive(Serialize)]
pub struct FormatsResponse {
    pub files: Vec<FormatEntry>,
    pub urls: Vec<&'static str>,
    pub notes: &'static str,
}

pub async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        files: DocumentFormat::ALL
            .iter()
            .map(|format| FormatEntry {
                format: format.as_str(),
                extensions: format.extensions(),
            })
            .collect(),
        urls: vec!["http(s) web pages", "YouTube watch pages (metadata only)"],
        notes: "Images are described by the configured LLM when one is set via POST /config/llm.",
    })
}
