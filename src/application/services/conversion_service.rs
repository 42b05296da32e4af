use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;
use reqwest::Url;
use zip::ZipArchive;

use crate::application::ports::{ConversionContext, FileConverter, UrlConverter};
use crate::domain::{
    ArchiveRecord, BatchItem, Document, DocumentFormat, MarkdownOut, TEXT_SOURCE, TextSnippet,
};

use super::temp_workspace::{TempArtifact, TempWorkspace, artifact_suffix, extension_suffix};
use super::{ConversionError, LlmConfigStore};

const SNIFF_BYTES: usize = 512;
const DEFAULT_UPLOAD_NAME: &str = "upload";
const OPAQUE_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from a client, before it is materialized on disk.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    pub fn new(
        filename: Option<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.filter(|name| !name.is_empty()),
            content_type,
            data: data.into(),
        }
    }

    fn declared_content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(OPAQUE_CONTENT_TYPE))
    }
}

/// Bridges one request to the converters while owning every temporary
/// artifact the request needs.
pub struct ConversionService<F, U>
where
    F: FileConverter + ?Sized,
    U: UrlConverter + ?Sized,
{
    file_converter: Arc<F>,
    url_converter: Arc<U>,
    workspace: TempWorkspace,
    llm_config: Arc<LlmConfigStore>,
    timeout: Duration,
}

impl<F, U> ConversionService<F, U>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    pub fn new(
        file_converter: Arc<F>,
        url_converter: Arc<U>,
        workspace: TempWorkspace,
        llm_config: Arc<LlmConfigStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            file_converter,
            url_converter,
            workspace,
            llm_config,
            timeout,
        }
    }

    pub fn workspace(&self) -> &TempWorkspace {
        &self.workspace
    }

    pub fn llm_config(&self) -> &Arc<LlmConfigStore> {
        &self.llm_config
    }

    async fn context(&self) -> ConversionContext {
        ConversionContext::with_llm(self.llm_config.snapshot().await)
    }

    #[tracing::instrument(skip(self, upload), fields(filename = ?upload.filename, bytes = upload.data.len()))]
    pub async fn convert_upload(&self, upload: Upload) -> Result<MarkdownOut, ConversionError> {
        let size = upload.data.len() as u64;
        let document = resolve_document(
            upload.filename.as_deref(),
            upload.declared_content_type(),
            &upload.data,
            size,
        )?;
        let content_type = upload
            .declared_content_type()
            .map(str::to_string)
            .or_else(|| guess_mime(&document.filename));

        let artifact = self
            .workspace
            .write(upload.data, &artifact_suffix(upload.filename.as_deref()))
            .await
            .map_err(ConversionError::internal)?;

        let context = self.context().await;
        let result = convert_with_deadline(
            self.file_converter.as_ref(),
            &artifact,
            &document,
            &context,
            self.timeout,
        )
        .await;
        artifact.release();
        let markdown = result?;

        tracing::info!(
            format = %document.format,
            markdown_chars = markdown.len(),
            "Upload converted"
        );

        Ok(MarkdownOut::from_upload(
            markdown,
            upload.filename,
            size,
            content_type,
        ))
    }

    /// Converts one item of a batch, turning a failure into an inline record.
    pub async fn convert_batch_item(&self, upload: Upload) -> BatchItem {
        let filename = upload.filename.clone();
        match self.convert_upload(upload).await {
            Ok(out) => BatchItem::Converted(out),
            Err(e) => {
                tracing::warn!(filename = ?filename, error = %e, "Batch item failed");
                BatchItem::Failed {
                    filename,
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn convert_uploads(&self, uploads: Vec<Upload>) -> Vec<BatchItem> {
        let mut items = Vec::with_capacity(uploads.len());
        for upload in uploads {
            items.push(self.convert_batch_item(upload).await);
        }
        items
    }

    #[tracing::instrument(skip(self))]
    pub async fn convert_url(&self, raw_url: &str) -> Result<MarkdownOut, ConversionError> {
        let url = parse_remote_url(raw_url)?;
        let context = self.context().await;

        let conversion = match tokio::time::timeout(
            self.timeout,
            self.url_converter.convert_url(&url, &context),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(url = %url, "URL conversion timed out");
                return Err(ConversionError::Timeout(self.timeout));
            }
        };

        tracing::info!(
            url = %url,
            markdown_chars = conversion.markdown.len(),
            "URL converted"
        );

        Ok(MarkdownOut::from_url(
            conversion.markdown,
            url.as_str(),
            conversion.content_type,
        ))
    }

    #[tracing::instrument(skip(self, snippet), fields(kind = snippet.extension()))]
    pub async fn convert_text(&self, snippet: TextSnippet) -> Result<MarkdownOut, ConversionError> {
        let extension = snippet.extension();
        let data = Bytes::copy_from_slice(snippet.content().as_bytes());
        let size = data.len() as u64;
        let format = DocumentFormat::from_extension(extension).unwrap_or(DocumentFormat::PlainText);
        let document = Document::new(format!("snippet.{extension}"), format, size);

        let artifact = self
            .workspace
            .write(data, &format!(".{extension}"))
            .await
            .map_err(ConversionError::internal)?;

        let context = self.context().await;
        let result = convert_with_deadline(
            self.file_converter.as_ref(),
            &artifact,
            &document,
            &context,
            self.timeout,
        )
        .await;
        artifact.release();
        let markdown = result?;

        Ok(MarkdownOut {
            markdown,
            source: Some(TEXT_SOURCE.to_string()),
            filename: None,
            bytes: Some(size),
            content_type: Some(snippet.mime().to_string()),
        })
    }

    /// Opens a zip upload and returns a lazy stream with one record per
    /// non-directory entry, in listing order.
    ///
    /// A corrupt archive fails before the stream is created. Each entry is
    /// extracted to its own artifact which is removed right after that entry
    /// is converted; the archive artifact lives as long as the stream.
    #[tracing::instrument(skip(self, upload), fields(filename = ?upload.filename, bytes = upload.data.len()))]
    pub async fn convert_archive(
        &self,
        upload: Upload,
    ) -> Result<BoxStream<'static, ArchiveRecord>, ConversionError> {
        let archive_artifact = self
            .workspace
            .write(upload.data, ".zip")
            .await
            .map_err(ConversionError::internal)?;

        let archive_path = archive_artifact.path().to_path_buf();
        let (archive, entries) = tokio::task::spawn_blocking(move || open_archive(&archive_path))
            .await
            .map_err(ConversionError::internal)??;

        tracing::info!(entries = entries.len(), "Archive opened");

        let context = self.context().await;
        let file_converter = Arc::clone(&self.file_converter);
        let workspace = self.workspace.clone();
        let timeout = self.timeout;

        let stream = async_stream::stream! {
            let mut slot = Some(archive);

            for (index, name) in entries {
                let Some(mut current) = slot.take() else {
                    break;
                };
                let entry_workspace = workspace.clone();
                let suffix = extension_suffix(&name);

                let joined = tokio::task::spawn_blocking(move || {
                    let extracted = extract_entry(&mut current, index, &entry_workspace, &suffix);
                    (current, extracted)
                })
                .await;

                let extracted = match joined {
                    Ok((returned, extracted)) => {
                        slot = Some(returned);
                        extracted
                    }
                    Err(e) => {
                        tracing::error!(entry = %name, error = %e, "Archive extraction task failed");
                        yield ArchiveRecord::Failed {
                            filename: name,
                            error: ConversionError::internal(e).to_string(),
                        };
                        break;
                    }
                };

                let result = match extracted {
                    Ok((artifact, head, size)) => {
                        let converted = match resolve_document(Some(name.as_str()), None, &head, size) {
                            Ok(document) => {
                                convert_with_deadline(
                                    file_converter.as_ref(),
                                    &artifact,
                                    &document,
                                    &context,
                                    timeout,
                                )
                                .await
                            }
                            Err(e) => Err(e),
                        };
                        artifact.release();
                        converted
                    }
                    Err(e) => Err(e),
                };

                let record = match result {
                    Ok(markdown) => {
                        tracing::debug!(entry = %name, markdown_chars = markdown.len(), "Archive entry converted");
                        ArchiveRecord::Converted { filename: name, markdown }
                    }
                    Err(e) => {
                        tracing::warn!(entry = %name, error = %e, "Archive entry failed");
                        ArchiveRecord::Failed { filename: name, error: e.to_string() }
                    }
                };
                yield record;
            }

            drop(slot);
            archive_artifact.release();
        };

        Ok(Box::pin(stream))
    }
}

async fn convert_with_deadline<C>(
    converter: &C,
    artifact: &TempArtifact,
    document: &Document,
    context: &ConversionContext,
    deadline: Duration,
) -> Result<String, ConversionError>
where
    C: FileConverter + ?Sized,
{
    match tokio::time::timeout(
        deadline,
        converter.convert_file(artifact.path(), document, context),
    )
    .await
    {
        Ok(result) => result.map_err(ConversionError::from),
        Err(_) => {
            tracing::warn!(filename = %document.filename, "Conversion timed out");
            Err(ConversionError::Timeout(deadline))
        }
    }
}

fn resolve_document(
    filename: Option<&str>,
    declared_content_type: Option<&str>,
    head: &[u8],
    size: u64,
) -> Result<Document, ConversionError> {
    let name = filename.unwrap_or(DEFAULT_UPLOAD_NAME);
    let format = filename
        .map(Path::new)
        .and_then(DocumentFormat::from_path)
        .or_else(|| declared_content_type.and_then(DocumentFormat::from_mime))
        .or_else(|| DocumentFormat::sniff(&head[..head.len().min(SNIFF_BYTES)]))
        .ok_or_else(|| {
            ConversionError::Conversion(format!(
                "unsupported format: could not determine the format of '{name}'"
            ))
        })?;

    Ok(Document::new(name.to_string(), format, size))
}

fn guess_mime(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Accepts only absolute http(s) URLs.
pub fn parse_remote_url(raw: &str) -> Result<Url, ConversionError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConversionError::Validation(format!("invalid url '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(ConversionError::Validation(format!(
            "invalid url '{raw}': missing host"
        ))),
        other => Err(ConversionError::Validation(format!(
            "unsupported url scheme: {other}"
        ))),
    }
}

type ArchiveEntries = Vec<(usize, String)>;

fn open_archive(path: &Path) -> Result<(ZipArchive<File>, ArchiveEntries), ConversionError> {
    let file = File::open(path).map_err(ConversionError::internal)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| ConversionError::Conversion(format!("invalid zip archive: {e}")))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(|e| {
            ConversionError::Conversion(format!("invalid zip entry #{index}: {e}"))
        })?;
        let name = entry.name().to_string();
        if !name.ends_with('/') {
            entries.push((index, name));
        }
    }

    Ok((archive, entries))
}

fn extract_entry(
    archive: &mut ZipArchive<File>,
    index: usize,
    workspace: &TempWorkspace,
    suffix: &str,
) -> Result<(TempArtifact, Vec<u8>, u64), ConversionError> {
    let mut entry = archive
        .by_index(index)
        .map_err(|e| ConversionError::Conversion(format!("failed to read entry: {e}")))?;
    let artifact = workspace
        .write_from(&mut entry, suffix)
        .map_err(|e| ConversionError::Conversion(format!("failed to extract entry: {e}")))?;

    let mut head = Vec::with_capacity(SNIFF_BYTES);
    File::open(artifact.path())
        .and_then(|file| file.take(SNIFF_BYTES as u64).read_to_end(&mut head))
        .map_err(ConversionError::internal)?;
    let size = artifact.size().map_err(ConversionError::internal)?;

    Ok((artifact, head, size))
}
