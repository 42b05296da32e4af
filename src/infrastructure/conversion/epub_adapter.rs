use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

use super::html_adapter::html_to_markdown;

const CONTAINER_PART: &str = "META-INF/container.xml";

/// Dublin Core fields rendered ahead of the chapters, in output order.
const METADATA_FIELDS: [(&str, &str); 6] = [
    ("title", "Title"),
    ("creator", "Authors"),
    ("language", "Language"),
    ("publisher", "Publisher"),
    ("date", "Date"),
    ("description", "Description"),
];

/// Converts an EPUB book: metadata first, then every XHTML chapter in
/// spine order.
pub struct EpubAdapter;

#[derive(Default)]
struct PackageDocument {
    metadata: HashMap<&'static str, Vec<String>>,
    manifest: HashMap<String, (String, String)>,
    spine: Vec<String>,
}

fn malformed(part: &str, e: impl std::fmt::Display) -> ConverterError {
    ConverterError::ExtractionFailed(format!("malformed {part}: {e}"))
}

fn attribute(element: &BytesStart<'_>, name: &str, part: &str) -> Result<Option<String>, ConverterError> {
    match element.try_get_attribute(name).map_err(|e| malformed(part, e))? {
        Some(value) => {
            let raw = std::str::from_utf8(&value.value).map_err(|e| malformed(part, e))?;
            Ok(Some(
                quick_xml::escape::unescape(raw).map_err(|e| malformed(part, e))?.into_owned(),
            ))
        }
        None => Ok(None),
    }
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<String, ConverterError> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| ConverterError::ExtractionFailed(format!("missing part {name}: {e}")))?;
    let mut text = String::new();
    part.read_to_string(&mut text)?;
    Ok(text)
}

/// Path of the package document named by `META-INF/container.xml`.
fn rootfile_path(container: &str) -> Result<String, ConverterError> {
    let mut reader = Reader::from_str(container);
    loop {
        match reader.read_event().map_err(|e| malformed(CONTAINER_PART, e))? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"rootfile" =>
            {
                if let Some(path) = attribute(&element, "full-path", CONTAINER_PART)? {
                    return Ok(path);
                }
            }
            Event::Eof => {
                return Err(ConverterError::ExtractionFailed(
                    "container.xml names no rootfile".to_string(),
                ));
            }
            _ => {}
        }
    }
}

fn parse_package(xml: &str, part: &str) -> Result<PackageDocument, ConverterError> {
    let mut reader = Reader::from_str(xml);
    let mut package = PackageDocument::default();
    let mut in_metadata = false;
    let mut field: Option<&'static str> = None;
    let mut value = String::new();

    loop {
        match reader.read_event().map_err(|e| malformed(part, e))? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"metadata" => in_metadata = true,
                name if in_metadata => {
                    field = METADATA_FIELDS
                        .iter()
                        .map(|(key, _)| *key)
                        .find(|key| key.as_bytes() == name);
                    value.clear();
                }
                _ => {}
            },
            Event::Empty(element) => match element.local_name().as_ref() {
                b"item" => {
                    let id = attribute(&element, "id", part)?;
                    let href = attribute(&element, "href", part)?;
                    let media_type = attribute(&element, "media-type", part)?.unwrap_or_default();
                    if let (Some(id), Some(href)) = (id, href) {
                        package.manifest.insert(id, (href, media_type));
                    }
                }
                b"itemref" => {
                    if let Some(idref) = attribute(&element, "idref", part)? {
                        package.spine.push(idref);
                    }
                }
                _ => {}
            },
            Event::Text(text) if field.is_some() => {
                value.push_str(&text.unescape().map_err(|e| malformed(part, e))?);
            }
            Event::End(element) => match element.local_name().as_ref() {
                b"metadata" => in_metadata = false,
                _ => {
                    if let Some(key) = field.take() {
                        let trimmed = value.trim();
                        if !trimmed.is_empty() {
                            package.metadata.entry(key).or_default().push(trimmed.to_string());
                        }
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(package)
}

/// Joins an href onto the package directory, resolving `.` and `..`.
fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn is_chapter(media_type: &str, href: &str) -> bool {
    media_type.contains("html")
        || matches!(
            DocumentFormat::from_path(Path::new(href)),
            Some(DocumentFormat::Html)
        )
}

impl EpubAdapter {
    pub fn epub_to_markdown(path: &Path) -> Result<String, ConverterError> {
        let mut archive = ZipArchive::new(File::open(path)?)
            .map_err(|e| ConverterError::ExtractionFailed(format!("not an EPUB package: {e}")))?;

        let package_path = rootfile_path(&read_part(&mut archive, CONTAINER_PART)?)?;
        let package = parse_package(&read_part(&mut archive, &package_path)?, &package_path)?;
        let base_dir = package_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");

        let mut blocks = Vec::new();
        let header: Vec<String> = METADATA_FIELDS
            .iter()
            .filter_map(|(key, label)| {
                package
                    .metadata
                    .get(key)
                    .map(|values| format!("**{label}:** {}", values.join(", ")))
            })
            .collect();
        if !header.is_empty() {
            blocks.push(header.join("\n"));
        }

        for idref in &package.spine {
            let Some((href, media_type)) = package.manifest.get(idref) else {
                tracing::debug!(idref = %idref, "Spine item missing from manifest");
                continue;
            };
            if !is_chapter(media_type, href) {
                continue;
            }

            let chapter_path = resolve_href(base_dir, href);
            let html = match archive.by_name(&chapter_path) {
                Ok(mut part) => {
                    let mut data = Vec::new();
                    part.read_to_end(&mut data)?;
                    String::from_utf8_lossy(&data).into_owned()
                }
                Err(e) => {
                    tracing::debug!(chapter = %chapter_path, error = %e, "Skipping missing chapter");
                    continue;
                }
            };

            let markdown = html_to_markdown(&html);
            if !markdown.is_empty() {
                blocks.push(markdown);
            }
        }

        Ok(blocks.join("\n\n"))
    }
}

#[async_trait]
impl FileConverter for EpubAdapter {
    #[tracing::instrument(skip(self, path, _context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        _context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Epub {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::epub_to_markdown(&path))
            .await
            .map_err(|e| ConverterError::ExtractionFailed(format!("task join error: {e}")))?
    }
}
