use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ConversionContext, ConverterError, FileConverter};
use crate::domain::{Document, DocumentFormat};

/// Dispatches each document to the adapter registered for its format.
pub struct CompositeConverter {
    adapters: HashMap<DocumentFormat, Arc<dyn FileConverter>>,
}

impl CompositeConverter {
    pub fn new(adapters: Vec<(DocumentFormat, Arc<dyn FileConverter>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.adapters.contains_key(&format)
    }

    /// Registered formats in a stable order.
    pub fn formats(&self) -> Vec<DocumentFormat> {
        DocumentFormat::ALL
            .into_iter()
            .filter(|format| self.supports(*format))
            .collect()
    }
}

#[async_trait]
impl FileConverter for CompositeConverter {
    async fn convert_file(
        &self,
        path: &Path,
        document: &Document,
        context: &ConversionContext,
    ) -> Result<String, ConverterError> {
        let adapter = self
            .adapters
            .get(&document.format)
            .ok_or_else(|| ConverterError::UnsupportedFormat(document.format.to_string()))?;

        adapter.convert_file(path, document, context).await
    }
}
