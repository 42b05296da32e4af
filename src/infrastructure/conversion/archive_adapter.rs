use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use zip::ZipArchive;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::application::services::{TempArtifact, TempWorkspace, extension_suffix};
use crate::domain::{Document, DocumentFormat};

/// Converts a zip upload into one Markdown document with a section per
/// entry. Entries the inner converter cannot handle are skipped.
pub struct ArchiveAdapter {
    inner: Arc<dyn FileConverter>,
    workspace: TempWorkspace,
}

type Entries = Vec<(usize, String, DocumentFormat)>;

fn invalid_archive(e: zip::result::ZipError) -> ConverterError {
    ConverterError::ExtractionFailed(format!("invalid zip archive: {e}"))
}

impl ArchiveAdapter {
    pub fn new(inner: Arc<dyn FileConverter>, workspace: TempWorkspace) -> Self {
        Self { inner, workspace }
    }

    /// Lists the file entries whose extension maps to a known format.
    fn open(path: &Path) -> Result<(ZipArchive<File>, Entries), ConverterError> {
        let mut archive = ZipArchive::new(File::open(path)?).map_err(invalid_archive)?;

        let mut entries = Vec::new();
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(invalid_archive)?;
            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            match DocumentFormat::from_path(Path::new(&name)) {
                Some(format) => entries.push((index, name, format)),
                None => tracing::debug!(entry = %name, "Skipping entry with unknown extension"),
            }
        }

        Ok((archive, entries))
    }

    fn extract(
        archive: &mut ZipArchive<File>,
        index: usize,
        name: &str,
        workspace: &TempWorkspace,
    ) -> Result<(TempArtifact, u64), ConverterError> {
        let mut entry = archive.by_index(index).map_err(invalid_archive)?;
        let artifact = workspace.write_from(&mut entry, &extension_suffix(name))?;
        let size = artifact.size()?;
        Ok((artifact, size))
    }
}

fn join_error(e: tokio::task::JoinError) -> ConverterError {
    ConverterError::ExtractionFailed(format!("task join error: {e}"))
}

#[async_trait]
impl FileConverter for ArchiveAdapter {
    #[tracing::instrument(skip(self, path, context), fields(filename = %document.filename))]
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        if document.format != DocumentFormat::Zip {
            return Err(ConverterError::UnsupportedFormat(document.format.to_string()));
        }

        let archive_path: PathBuf = path.to_path_buf();
        let (mut archive, entries) = tokio::task::spawn_blocking(move || Self::open(&archive_path))
            .await
            .map_err(join_error)??;

        let mut markdown = format!("Content from the zip file `{}`:", document.filename);
        for (index, name, format) in entries {
            let workspace = self.workspace.clone();
            let entry_name = name.clone();
            let (returned, extracted) = tokio::task::spawn_blocking(move || {
                let extracted = Self::extract(&mut archive, index, &entry_name, &workspace);
                (archive, extracted)
            })
            .await
            .map_err(join_error)?;
            archive = returned;

            let (artifact, size) = match extracted {
                Ok(extracted) => extracted,
                Err(e) => {
                    tracing::debug!(entry = %name, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let entry_document = Document::new(name.clone(), format, size);
            let result = self
                .inner
                .convert_file(artifact.path(), &entry_document, context)
                .await;
            artifact.release();

            match result {
                Ok(content) => {
                    markdown.push_str(&format!("\n\n## File: {}\n\n{}", name, content.trim()));
                }
                Err(e) => {
                    tracing::debug!(entry = %name, error = %e, "Skipping unconvertible entry");
                }
            }
        }

        Ok(markdown)
    }
}
