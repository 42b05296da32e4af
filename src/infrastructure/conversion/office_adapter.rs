use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pptx_to_md::{ParserConfig, PptxContainer};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads Word documents and PowerPoint decks.
pub struct OfficeAdapter;

/// Paragraph being assembled while walking `word/document.xml`.
#[derive(Default)]
struct Paragraph {
    text: String,
    style: Option<String>,
    numbered: bool,
}

impl Paragraph {
    fn into_block(self) -> Option<String> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        let prefix = self
            .style
            .as_deref()
            .map(heading_prefix)
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| if self.numbered { "- ".to_string() } else { String::new() });

        Some(format!("{prefix}{text}"))
    }
}

fn xml_error(e: impl std::fmt::Display) -> ConverterError {
    ConverterError::ExtractionFailed(format!("malformed {DOCUMENT_PART}: {e}"))
}

fn style_value(element: &BytesStart<'_>) -> Result<Option<String>, ConverterError> {
    match element.try_get_attribute("w:val").map_err(xml_error)? {
        Some(attribute) => {
            let raw = std::str::from_utf8(&attribute.value).map_err(xml_error)?;
            Ok(Some(quick_xml::escape::unescape(raw).map_err(xml_error)?.into_owned()))
        }
        None => Ok(None),
    }
}

impl OfficeAdapter {
    fn read_document_part(path: &Path) -> Result<String, ConverterError> {
        let mut archive = ZipArchive::new(File::open(path)?)
            .map_err(|e| ConverterError::ExtractionFailed(format!("not an OOXML package: {e}")))?;
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            ConverterError::ExtractionFailed(format!("missing part {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }

    pub fn docx_to_markdown(path: &Path) -> Result<String, ConverterError> {
        let xml = Self::read_document_part(path)?;
        let mut reader = Reader::from_str(&xml);

        let mut blocks = Vec::new();
        let mut paragraph: Option<Paragraph> = None;
        let mut in_run = false;
        let mut in_text = false;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(element) => match element.name().as_ref() {
                    b"w:p" => paragraph = Some(Paragraph::default()),
                    b"w:r" => in_run = true,
                    b"w:t" => in_text = true,
                    b"w:numPr" => {
                        if let Some(current) = paragraph.as_mut() {
                            current.numbered = true;
                        }
                    }
                    _ => {}
                },
                Event::Empty(element) => {
                    let Some(current) = paragraph.as_mut() else {
                        continue;
                    };
                    match element.name().as_ref() {
                        b"w:pStyle" => current.style = style_value(&element)?,
                        b"w:tab" if in_run => current.text.push('\t'),
                        b"w:br" | b"w:cr" if in_run => current.text.push('\n'),
                        _ => {}
                    }
                }
                Event::Text(text) if in_text => {
                    if let Some(current) = paragraph.as_mut() {
                        current.text.push_str(&text.unescape().map_err(xml_error)?);
                    }
                }
                Event::End(element) => match element.name().as_ref() {
                    b"w:p" => {
                        if let Some(block) = paragraph.take().and_then(Paragraph::into_block) {
                            blocks.push(block);
                        }
                    }
                    b"w:r" => in_run = false,
                    b"w:t" => in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(blocks.join("\n\n"))
    }

    pub fn pptx_to_markdown(path: &Path) -> Result<String, ConverterError> {
        let config = ParserConfig::builder()
            .extract_images(false)
            .include_slide_comment(false)
            .build();

        let mut container = PptxContainer::open(path, config).map_err(|e| {
            ConverterError::ExtractionFailed(format!("not a readable presentation: {e}"))
        })?;
        let slides = container
            .parse_all()
            .map_err(|e| ConverterError::ExtractionFailed(format!("failed to parse slides: {e}")))?;

        let sections: Vec<String> = slides
            .into_iter()
            .enumerate()
            .map(|(index, slide)| {
                let body = slide.convert_to_md().unwrap_or_default();
                let body = body.trim();
                if body.is_empty() {
                    format!("<!-- Slide number: {} -->", index + 1)
                } else {
                    format!("<!-- Slide number: {} -->\n{body}", index + 1)
                }
            })
            .collect();

        Ok(sections.join("\n\n"))
    }
}

fn heading_prefix(style: &str) -> String {
    if style.eq_ignore_ascii_case("Title") {
        return "# ".to_string();
    }

    style
        .strip_prefix("Heading")
        .or_else(|| style.strip_prefix("heading"))
        .and_then(|level| level.trim().parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
        .map(|level| format!("{} ", "#".repeat(level)))
        .unwrap_or_default()
}

#[async_trait]
impl FileConverter for OfficeAdapter {
    #[tracing::instrument(skip(self, path, _context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        let extract: fn(&Path) -> Result<String, ConverterError> = match document.format {
            DocumentFormat::Docx => Self::docx_to_markdown,
            DocumentFormat::Pptx => Self::pptx_to_markdown,
            other => return Err(ConverterError::UnsupportedFormat(other.to_string())),
        };

        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || extract(&path))
            .await
            .map_err(|e| ConverterError::ExtractionFailed(format!("task join error: {e}")))?
    }
}
