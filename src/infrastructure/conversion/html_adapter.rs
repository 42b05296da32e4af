use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

use super::xml_text::decode_entities;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static pattern"));
static NON_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<head\b[^>]*>.*?</head>|<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<noscript\b[^>]*>.*?</noscript>|<!--.*?-->",
    )
    .expect("static pattern")
});
static HEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6][\s>/]").expect("static pattern"));

/// Converts an HTML page to Markdown. Scripts and styles are dropped; the
/// page title becomes the top heading when the body has none.
pub fn html_to_markdown(html: &str) -> String {
    let title = TITLE
        .captures(html)
        .map(|caps| decode_entities(caps[1].trim()).into_owned())
        .filter(|title| !title.is_empty());

    let body = NON_CONTENT.replace_all(html, "");
    let has_heading = HEADING_TAG.is_match(&body);
    let markdown = html2md::parse_html(&body);
    let markdown = markdown.trim();

    match title {
        Some(title) if !has_heading && !has_atx_heading(markdown) => {
            if markdown.is_empty() {
                format!("# {title}")
            } else {
                format!("# {title}\n\n{markdown}")
            }
        }
        _ => markdown.to_string(),
    }
}

fn has_atx_heading(markdown: &str) -> bool {
    markdown
        .lines()
        .any(|line| line.trim_start_matches('#').starts_with(' ') && line.starts_with('#'))
}

pub struct HtmlAdapter;

#[async_trait]
impl FileConverter for HtmlAdapter {
    #[tracing::instrument(skip(self, path, _context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Html {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let data = tokio::fs::read(path).await?;
        Ok(html_to_markdown(&String::from_utf8_lossy(&data)))
    }
}
