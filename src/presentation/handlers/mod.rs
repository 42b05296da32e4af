mod convert_file;
mod convert_files;
mod convert_text;
mod convert_url;
mod convert_zip;
mod error;
mod formats;
mod health;
mod llm_config;
mod multipart;
mod query_flags;
mod responses;

pub use convert_file::convert_file_handler;
pub use convert_files::{BatchResponse, convert_files_handler};
pub use convert_text::{TextRequest, convert_text_handler};
pub use convert_url::{UrlRequest, convert_url_handler};
pub use convert_zip::convert_zip_handler;
pub use error::{ErrorResponse, status_for};
pub use formats::formats_handler;
pub use health::health_handler;
pub use llm_config::{
    LlmConfigRequest, LlmConfigResponse, LlmConfigStatus, configure_llm_handler,
    llm_status_handler,
};
pub use query_flags::{BatchQuery, DownloadQuery, parse_flag};
pub use responses::{NDJSON_CONTENT_TYPE, NdjsonRecord, ndjson_line};
