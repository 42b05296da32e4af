use axum::extract::Multipart;

use crate::application::services::{ConversionError, Upload};

use super::error::multipart_error;

async fn next_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<Upload>, ConversionError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(field_name) {
            tracing::debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        tracing::debug!(filename = ?filename, content_type = ?content_type, bytes = data.len(), "Upload received");
        return Ok(Some(Upload::new(filename, content_type, data)));
    }

    Ok(None)
}

/// Reads the first part named `field_name`.
pub async fn single_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Upload, ConversionError> {
    next_upload(multipart, field_name).await?.ok_or_else(|| {
        ConversionError::Validation(format!("Missing multipart field '{field_name}'"))
    })
}

/// Reads every part named `field_name`, in arrival order.
pub async fn all_uploads(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<Upload>, ConversionError> {
    let mut uploads = Vec::new();
    while let Some(upload) = next_upload(multipart, field_name).await? {
        uploads.push(upload);
    }
    Ok(uploads)
}
