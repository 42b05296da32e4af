use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::domain::{MarkdownOut, TextSnippet};
use crate::presentation::state::AppState;

use super::error::json_rejection;

#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json_text: Option<String>,
    #[serde(default)]
    pub xml: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn convert_text_handler<F, U>(
    State(state): State<AppState<F, U>>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<MarkdownOut>, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let Json(request) = body.map_err(json_rejection)?;
    let snippet =
        TextSnippet::exactly_one(request.html, request.csv, request.json_text, request.xml)?;

    let out = state.conversion_service.convert_text(snippet).await?;
    Ok(Json(out))
}
