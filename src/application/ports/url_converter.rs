use async_trait::async_trait;
use reqwest::Url;

use super::{ConversionContext, ConverterError};

/// Fetches a remote resource and turns it into Markdown.
#[async_trait]
pub trait UrlConverter: Send + Sync {
    async fn convert_url(
        &self,
        url: &Url,
        context: &ConversionContext,
    ) -> Result<UrlConversion, ConverterError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlConversion {
    pub markdown: String,
    pub content_type: Option<String>,
}
