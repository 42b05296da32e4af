use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::TempPath;

/// Every artifact created by the service starts with this prefix.
pub const ARTIFACT_PREFIX: &str = "mdgw-";

const MAX_SUFFIX_CHARS: usize = 64;

/// Directory in which request-scoped temporary artifacts are created.
#[derive(Debug, Clone)]
pub struct TempWorkspace {
    root: PathBuf,
}

impl TempWorkspace {
    pub fn new(root: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn system() -> Self {
        Self {
            root: std::env::temp_dir(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `data` to a new uniquely named artifact off the async runtime.
    pub async fn write(&self, data: Bytes, suffix: &str) -> io::Result<TempArtifact> {
        let workspace = self.clone();
        let suffix = suffix.to_string();

        tokio::task::spawn_blocking(move || {
            let mut reader: &[u8] = &data;
            workspace.write_from(&mut reader, &suffix)
        })
        .await
        .map_err(|e| io::Error::other(format!("temp write task failed: {e}")))?
    }

    /// Blocking variant used from inside `spawn_blocking` sections.
    pub fn write_from<R: Read>(&self, reader: &mut R, suffix: &str) -> io::Result<TempArtifact> {
        let mut file = tempfile::Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(suffix)
            .tempfile_in(&self.root)?;

        io::copy(reader, &mut file)?;
        file.flush()?;

        let artifact = TempArtifact::new(file.into_temp_path());
        tracing::trace!(path = %artifact.path().display(), "Temporary artifact created");
        Ok(artifact)
    }
}

/// A temporary file exclusively owned by one request.
///
/// Removed by [`release`](Self::release) or, on any other exit path, on drop.
/// Removal failures are logged and never surface as errors.
#[derive(Debug)]
pub struct TempArtifact {
    path: Option<TempPath>,
}

impl TempArtifact {
    fn new(path: TempPath) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn size(&self) -> io::Result<u64> {
        std::fs::metadata(self.path()).map(|m| m.len())
    }

    pub fn release(mut self) {
        if let Some(path) = self.path.take() {
            remove(path);
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            remove(path);
        }
    }
}

fn remove(path: TempPath) {
    let removed = path.to_path_buf();
    match path.close() {
        Ok(()) => tracing::trace!(path = %removed.display(), "Temporary artifact removed"),
        Err(e) => tracing::warn!(
            path = %removed.display(),
            error = %e,
            "Failed to remove temporary artifact"
        ),
    }
}

/// Suffix for an uploaded file: `_` plus the sanitized original name, which
/// keeps the extension visible to format detection.
pub fn artifact_suffix(filename: Option<&str>) -> String {
    let Some(name) = filename.map(base_name).filter(|n| !n.is_empty()) else {
        return String::new();
    };

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let skip = sanitized.chars().count().saturating_sub(MAX_SUFFIX_CHARS);
    format!("_{}", sanitized.chars().skip(skip).collect::<String>())
}

/// Suffix holding only the extension of `name`, e.g. `.csv`.
pub fn extension_suffix(name: &str) -> String {
    Path::new(base_name(name))
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 16)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
