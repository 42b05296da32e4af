/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: Option<String>,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, level: Option<String>) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            level: level.filter(|l| !l.trim().is_empty()),
        }
    }
}
