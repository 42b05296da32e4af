use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::domain::BatchItem;
use crate::presentation::state::AppState;

use super::error::{multipart_rejection, query_rejection};
use super::multipart::all_uploads;
use super::query_flags::BatchQuery;
use super::responses::ndjson_response;

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub items: Vec<BatchItem>,
}

#[tracing::instrument(skip_all)]
pub async fn convert_files_handler<F, U>(
    State(state): State<AppState<F, U>>,
    query: Result<Query<BatchQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let Query(query) = query.map_err(query_rejection)?;
    let mut multipart = multipart.map_err(multipart_rejection)?;
    let uploads = all_uploads(&mut multipart, "files").await?;

    tracing::info!(count = uploads.len(), as_ndjson = query.as_ndjson, "Batch received");

    if !query.as_ndjson {
        let items = state.conversion_service.convert_uploads(uploads).await;
        return Ok(Json(BatchResponse { items }).into_response());
    }

    let service = Arc::clone(&state.conversion_service);
    let records = async_stream::stream! {
        for upload in uploads {
            yield service.convert_batch_item(upload).await;
        }
    };

    Ok(ndjson_response(records))
}
