use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::LlmProvider;
use crate::infrastructure::observability::redact_secrets;

const MAX_TOKENS: usize = 1024;
const ERROR_BODY_LIMIT: usize = 512;

/// Talks to the OpenAI-compatible chat endpoint of one provider. The model
/// is addressed by its qualified name; the provider prefix is stripped on
/// the wire.
pub struct RoutedLlmClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_key: SecretString,
    model_name: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl RoutedLlmClient {
    pub fn new(
        client: Client,
        provider: LlmProvider,
        base_url: impl Into<String>,
        api_key: SecretString,
        model_name: String,
    ) -> Self {
        Self {
            client,
            provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model_name,
        }
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_messages<'a>(prompt: &'a str, image_url: Option<&'a str>) -> Vec<ChatMessage<'a>> {
        let mut content = vec![ContentPart::Text { text: prompt }];
        if let Some(url) = image_url {
            content.push(ContentPart::ImageUrl {
                image_url: ImageUrl { url },
            });
        }
        vec![ChatMessage {
            role: "user",
            content,
        }]
    }
}

#[async_trait]
impl LlmClient for RoutedLlmClient {
    #[tracing::instrument(skip(self, prompt, image_url), fields(model = %self.model_name, has_image = image_url.is_some()))]
    async fn complete(
        &self,
        prompt: &str,
        image_url: Option<&str>,
    ) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: self.provider.wire_model_name(&self.model_name),
            messages: Self::build_messages(prompt, image_url),
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body: String = redact_secrets(&body).chars().take(ERROR_BODY_LIMIT).collect();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
