use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub conversion: ConversionSettings,
    pub logging: LoggingSettings,
    pub llm: LlmSettings,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>.*` and `APP__SECTION__KEY`
    /// environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Directory for temporary artifacts; the system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub fetch_timeout_seconds: u64,
    pub max_upload_bytes: usize,
}

impl ConversionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds.max(1))
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            temp_dir: None,
            timeout_seconds: 120,
            fetch_timeout_seconds: 30,
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub json: bool,
}

/// Optional LLM configuration installed at startup.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// Per-provider endpoint overrides keyed by provider name.
    pub base_urls: HashMap<String, String>,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}
