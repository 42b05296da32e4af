use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Response};

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::presentation::state::AppState;

use super::error::{multipart_rejection, query_rejection};
use super::multipart::single_upload;
use super::query_flags::DownloadQuery;
use super::responses::markdown_attachment;

#[tracing::instrument(skip_all)]
pub async fn convert_file_handler<F, U>(
    State(state): State<AppState<F, U>>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let Query(query) = query.map_err(query_rejection)?;
    let mut multipart = multipart.map_err(multipart_rejection)?;
    let upload = single_upload(&mut multipart, "file").await?;

    let out = state.conversion_service.convert_upload(upload).await?;

    if query.download {
        let stem = out.filename.clone().unwrap_or_default();
        return Ok(markdown_attachment(out.markdown, &stem));
    }

    Ok(Json(out).into_response())
}
