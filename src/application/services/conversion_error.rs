use std::time::Duration;

use crate::application::ports::ConverterError;
use crate::domain::SnippetSelectionError;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conversion(String),
    #[error("{0}")]
    Configuration(String),
    #[error("conversion timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConversionError {
    pub fn internal(error: impl std::fmt::Display) -> Self {
        Self::Internal(error.to_string())
    }

    /// Whether the caller, rather than this service, is responsible.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<ConverterError> for ConversionError {
    fn from(error: ConverterError) -> Self {
        match error {
            ConverterError::InvalidInput(message) => Self::Validation(message),
            other => Self::Conversion(other.to_string()),
        }
    }
}

impl From<SnippetSelectionError> for ConversionError {
    fn from(error: SnippetSelectionError) -> Self {
        Self::Validation(error.to_string())
    }
}
