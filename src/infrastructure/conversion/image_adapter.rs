use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

const CAPTION_PROMPT: &str = "Write a detailed caption for this image.";

/// Describes an image by its metadata and, when an LLM is configured, a
/// generated caption. A failed caption request never fails the conversion.
pub struct ImageAdapter;

impl ImageAdapter {
    fn mime_type(filename: &str, data: &[u8]) -> String {
        sniff_image_mime(data)
            .map(str::to_string)
            .or_else(|| {
                mime_guess::from_path(filename)
                    .first()
                    .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
                    .map(|mime| mime.essence_str().to_string())
            })
            .unwrap_or_else(|| "image/png".to_string())
    }
}

fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(b"\xFF\xD8\xFF") {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Width and height for formats whose header carries them at a fixed offset.
fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") && data.len() >= 24 {
        let width = u32::from_be_bytes(data[16..20].try_into().ok()?);
        let height = u32::from_be_bytes(data[20..24].try_into().ok()?);
        return Some((width, height));
    }
    if data.starts_with(b"GIF8") && data.len() >= 10 {
        let width = u16::from_le_bytes(data[6..8].try_into().ok()?);
        let height = u16::from_le_bytes(data[8..10].try_into().ok()?);
        return Some((width.into(), height.into()));
    }
    None
}

#[async_trait]
impl FileConverter for ImageAdapter {
    #[tracing::instrument(skip(self, path, context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Image {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;
        let mime = Self::mime_type(&document.filename, &data);

        let mut markdown = format!("ImageFormat: {mime}\n");
        if let Some((width, height)) = image_dimensions(&data) {
            markdown.push_str(&format!("ImageSize: {width}x{height}\n"));
        }

        if let Some(client) = context.llm_client() {
            let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&data));
            match client.complete(CAPTION_PROMPT, Some(&data_url)).await {
                Ok(caption) if !caption.trim().is_empty() => {
                    markdown.push_str("\n# Description:\n");
                    markdown.push_str(caption.trim());
                    markdown.push('\n');
                }
                Ok(_) => tracing::debug!("LLM returned an empty caption"),
                Err(e) => {
                    tracing::warn!(model = client.model_name(), error = %e, "Image captioning failed");
                }
            }
        }

        Ok(markdown.trim_end().to_string())
    }
}
