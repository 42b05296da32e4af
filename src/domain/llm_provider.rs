use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    OpenAi,
    Gemini,
    Groq,
    Claude,
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 4] = [Self::OpenAi, Self::Gemini, Self::Groq, Self::Claude];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::Claude => "claude",
        }
    }

    /// Model name in the `provider/model` form the completion router expects.
    ///
    /// Only providers that are not reachable under their bare model names
    /// carry a prefix.
    pub fn qualified_model_name(&self, model: &str) -> String {
        match self {
            Self::Gemini | Self::Groq => format!("{}/{}", self.as_str(), model),
            Self::OpenAi | Self::Claude => model.to_string(),
        }
    }

    /// Inverse of [`qualified_model_name`](Self::qualified_model_name): the
    /// name sent on the wire to the provider's endpoint.
    pub fn wire_model_name<'a>(&self, qualified: &'a str) -> &'a str {
        let prefix = format!("{}/", self.as_str());
        qualified.strip_prefix(prefix.as_str()).unwrap_or(qualified)
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "groq" => Ok(Self::Groq),
            "claude" => Ok(Self::Claude),
            other => Err(format!(
                "Invalid LLM provider: {}. Expected: openai, gemini, groq, or claude",
                other
            )),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and model selection for LLM-assisted conversion.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: SecretString,
    pub model: String,
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }

    pub fn qualified_model_name(&self) -> String {
        self.provider.qualified_model_name(&self.model)
    }
}
