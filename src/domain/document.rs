use std::fmt;
use std::path::Path;

/// Describes a materialized input handed to a file converter.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub format: DocumentFormat,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, format: DocumentFormat, size_bytes: u64) -> Self {
        Self {
            filename,
            format,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Html,
    Csv,
    Json,
    Xml,
    PlainText,
    Markdown,
    Pdf,
    Spreadsheet,
    Docx,
    Pptx,
    Epub,
    Image,
    Zip,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 13] = [
        Self::Html,
        Self::Csv,
        Self::Json,
        Self::Xml,
        Self::PlainText,
        Self::Markdown,
        Self::Pdf,
        Self::Spreadsheet,
        Self::Docx,
        Self::Pptx,
        Self::Epub,
        Self::Image,
        Self::Zip,
    ];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xml" | "rss" | "atom" => Some(Self::Xml),
            "txt" | "text" | "log" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "pdf" => Some(Self::Pdf),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Spreadsheet),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            "epub" => Some(Self::Epub),
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tiff" | "tif" => Some(Self::Image),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "text/html" | "application/xhtml+xml" => Some(Self::Html),
            "text/csv" => Some(Self::Csv),
            "application/json" => Some(Self::Json),
            "text/xml" | "application/xml" | "application/rss+xml" | "application/atom+xml" => {
                Some(Self::Xml)
            }
            "text/plain" => Some(Self::PlainText),
            "text/markdown" => Some(Self::Markdown),
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel"
            | "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Spreadsheet),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(Self::Pptx)
            }
            "application/epub+zip" => Some(Self::Epub),
            "application/zip" | "application/x-zip-compressed" => Some(Self::Zip),
            m if m.starts_with("image/") => Some(Self::Image),
            _ => None,
        }
    }

    /// Guesses the format from leading bytes when no usable name is available.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }
        if data.starts_with(b"PK\x03\x04") || data.starts_with(b"PK\x05\x06") {
            return Some(Self::Zip);
        }
        if data.starts_with(b"\x89PNG")
            || data.starts_with(b"\xFF\xD8\xFF")
            || data.starts_with(b"GIF8")
            || (data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP")
        {
            return Some(Self::Image);
        }

        let window = &data[..data.len().min(512)];
        let head = match std::str::from_utf8(window) {
            Ok(text) => text,
            // A multi-byte character cut at the window edge is still text.
            Err(e) if e.error_len().is_none() => std::str::from_utf8(&window[..e.valid_up_to()]).ok()?,
            Err(_) => return None,
        };
        let head = head.trim_start_matches('\u{feff}').trim_start();
        let lowered = head.to_ascii_lowercase();

        if lowered.starts_with("<!doctype html") || lowered.starts_with("<html") {
            Some(Self::Html)
        } else if lowered.starts_with("<?xml") {
            Some(Self::Xml)
        } else if head.starts_with('{') || head.starts_with('[') {
            Some(Self::Json)
        } else {
            Some(Self::PlainText)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::PlainText => "text",
            Self::Markdown => "markdown",
            Self::Pdf => "pdf",
            Self::Spreadsheet => "spreadsheet",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Epub => "epub",
            Self::Image => "image",
            Self::Zip => "zip",
        }
    }

    /// Extensions recognised for this format, in listing order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Html => &["html", "htm", "xhtml"],
            Self::Csv => &["csv"],
            Self::Json => &["json"],
            Self::Xml => &["xml", "rss", "atom"],
            Self::PlainText => &["txt", "text", "log"],
            Self::Markdown => &["md", "markdown"],
            Self::Pdf => &["pdf"],
            Self::Spreadsheet => &["xlsx", "xlsm", "xls", "ods"],
            Self::Docx => &["docx"],
            Self::Pptx => &["pptx"],
            Self::Epub => &["epub"],
            Self::Image => &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "tif"],
            Self::Zip => &["zip"],
        }
    }

    pub fn default_extension(&self) -> &'static str {
        self.extensions()[0]
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
