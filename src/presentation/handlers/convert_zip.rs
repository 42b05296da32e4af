use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Response;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::presentation::state::AppState;

use super::error::multipart_rejection;
use super::multipart::single_upload;
use super::responses::ndjson_response;

/// Streams one `{filename, markdown}` or `{filename, error}` line per entry.
#[tracing::instrument(skip_all)]
pub async fn convert_zip_handler<F, U>(
    State(state): State<AppState<F, U>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let mut multipart = multipart.map_err(multipart_rejection)?;
    let upload = single_upload(&mut multipart, "file").await?;

    let records = state.conversion_service.convert_archive(upload).await?;
    Ok(ndjson_response(records))
}
