mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{ConversionSettings, LlmSettings, LoggingSettings, ServerSettings, Settings};
