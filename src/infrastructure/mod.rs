pub mod conversion;
pub mod llm;
pub mod observability;
