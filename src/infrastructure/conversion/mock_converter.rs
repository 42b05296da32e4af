use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    ConversionContext, ConverterError, FileConverter, UrlConversion, UrlConverter,
};
use crate::domain::Document;

/// Echoes file contents back as Markdown, optionally after a delay.
#[derive(Default)]
pub struct MockConverter {
    delay: Option<Duration>,
}

impl MockConverter {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }
}

#[async_trait]
impl FileConverter for MockConverter {
    async fn convert_file(
        &self,
        path: &Path,
        _document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let data = tokio::fs::read(path).await?;
        String::from_utf8(data).map_err(|e| ConverterError::ExtractionFailed(e.to_string()))
    }
}

#[async_trait]
impl UrlConverter for MockConverter {
    async fn convert_url(
        &self,
        url: &reqwest::Url,
        _context: &ConversionContext,
    ) -> Result<UrlConversion, ConverterError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(UrlConversion {
            markdown: format!("# {url}"),
            content_type: Some("text/html".to_string()),
        })
    }
}
