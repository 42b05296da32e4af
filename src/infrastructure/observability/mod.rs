mod init_tracing;
mod request_id;
mod secret_mask;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use secret_mask::{mask_secret, redact_secrets};
pub use tracing_config::TracingConfig;
