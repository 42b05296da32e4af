use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};

use crate::application::ports::{
    ConversionContext, ConverterError, FileConverter, UrlConversion, UrlConverter,
};
use crate::application::services::TempWorkspace;
use crate::domain::{Document, DocumentFormat};

use super::html_adapter::html_to_markdown;
use super::youtube;

const USER_AGENT: &str = concat!("markdown-gateway/", env!("CARGO_PKG_VERSION"));

/// Fetches a remote resource and converts it. HTML is rendered in memory;
/// anything else goes through a temporary file and the file converter.
pub struct WebPageConverter {
    client: Client,
    file_converter: Arc<dyn FileConverter>,
    workspace: TempWorkspace,
    max_bytes: u64,
}

impl WebPageConverter {
    pub fn new(
        file_converter: Arc<dyn FileConverter>,
        workspace: TempWorkspace,
        fetch_timeout: Duration,
        max_bytes: u64,
    ) -> Result<Self, ConverterError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| ConverterError::FetchFailed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            file_converter,
            workspace,
            max_bytes,
        })
    }

    /// Buffers the body chunk by chunk, giving up as soon as it grows past
    /// `max_bytes`. Covers responses without a `Content-Length`.
    async fn read_limited(&self, mut response: Response, url: &Url) -> Result<Bytes, ConverterError> {
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ConverterError::FetchFailed(format!("failed to read body of {url}: {e}")))?
        {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(ConverterError::FetchFailed(format!(
                    "remote document exceeds the {} byte limit",
                    self.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    fn remote_filename(url: &Url, format: DocumentFormat) -> String {
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .filter(|name| DocumentFormat::from_path(Path::new(name)) == Some(format))
            .unwrap_or_else(|| format!("download.{}", format.default_extension()))
    }
}

#[async_trait]
impl UrlConverter for WebPageConverter {
    #[tracing::instrument(skip(self, context), fields(url = %url))]
    async fn convert_url(
        &self,
        url: &Url,
        context: &ConversionContext,
    ) -> Result<UrlConversion, ConverterError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ConverterError::FetchFailed(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConverterError::FetchFailed(format!(
                "fetching {url} returned HTTP {status}"
            )));
        }

        if let Some(length) = response
            .content_length()
            .filter(|length| *length > self.max_bytes)
        {
            return Err(ConverterError::FetchFailed(format!(
                "remote document is {length} bytes; the limit is {}",
                self.max_bytes
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let final_url = response.url().clone();
        let body = self.read_limited(response, url).await?;

        let format = content_type
            .as_deref()
            .and_then(DocumentFormat::from_mime)
            .or_else(|| DocumentFormat::from_path(Path::new(url.path())))
            .or_else(|| DocumentFormat::sniff(&body))
            .ok_or_else(|| ConverterError::UnsupportedFormat(format!("content at {url}")))?;

        tracing::debug!(%format, bytes = body.len(), "Remote document fetched");

        if format == DocumentFormat::Html {
            let html = String::from_utf8_lossy(&body);
            let markdown = if youtube::is_watch_page(url) || youtube::is_watch_page(&final_url) {
                youtube::render_watch_page(&html)
            } else {
                html_to_markdown(&html)
            };
            return Ok(UrlConversion {
                markdown,
                content_type,
            });
        }

        let size = body.len() as u64;
        let document = Document::new(Self::remote_filename(url, format), format, size);
        let artifact = self
            .workspace
            .write(body, &format!(".{}", format.default_extension()))
            .await?;

        let result = self
            .file_converter
            .convert_file(artifact.path(), &document, context)
            .await;
        artifact.release();

        Ok(UrlConversion {
            markdown: result?,
            content_type,
        })
    }
}
