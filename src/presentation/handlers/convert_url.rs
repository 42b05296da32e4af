use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::presentation::state::AppState;

use super::error::{json_rejection, query_rejection};
use super::query_flags::DownloadQuery;
use super::responses::markdown_attachment;

#[derive(Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[tracing::instrument(skip_all)]
pub async fn convert_url_handler<F, U>(
    State(state): State<AppState<F, U>>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
    body: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Response, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let Query(query) = query.map_err(query_rejection)?;
    let Json(request) = body.map_err(json_rejection)?;

    let out = state.conversion_service.convert_url(&request.url).await?;

    if query.download {
        return Ok(markdown_attachment(out.markdown, "converted"));
    }

    Ok(Json(out).into_response())
}
