use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileConverter, UrlConverter};
use crate::application::services::ConversionError;
use crate::domain::{LlmConfig, LlmProvider};
use crate::infrastructure::observability::mask_secret;
use crate::presentation::state::AppState;

use super::error::json_rejection;

#[derive(Deserialize)]
pub struct LlmConfigRequest {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct LlmConfigResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LlmConfigStatus {
    pub configured: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub version: u64,
}

#[tracing::instrument(skip(state, body))]
pub async fn configure_llm_handler<F, U>(
    State(state): State<AppState<F, U>>,
    body: Result<Json<LlmConfigRequest>, JsonRejection>,
) -> Result<Json<LlmConfigResponse>, ConversionError>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let Json(request) = body.map_err(json_rejection)?;

    tracing::info!(
        provider = %request.provider,
        model = %request.model,
        api_key = %mask_secret(&request.api_key),
        "LLM configuration requested"
    );

    let provider: LlmProvider = request
        .provider
        .parse()
        .map_err(ConversionError::Configuration)?;

    let snapshot = state
        .conversion_service
        .llm_config()
        .configure(LlmConfig::new(provider, request.api_key, request.model))
        .await?;

    Ok(Json(LlmConfigResponse {
        status: "ok".to_string(),
        message: format!(
            "LLM client configured with {} model {}",
            snapshot.provider, snapshot.model_name
        ),
    }))
}

pub async fn llm_status_handler<F, U>(
    State(state): State<AppState<F, U>>,
) -> Json<LlmConfigStatus>
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let store = state.conversion_service.llm_config();
    let snapshot = store.snapshot().await;

    Json(LlmConfigStatus {
        configured: snapshot.is_some(),
        provider: snapshot.as_ref().map(|s| s.provider.to_string()),
        model: snapshot.as_ref().map(|s| s.model_name.clone()),
        version: snapshot.as_ref().map(|s| s.version).unwrap_or_else(|| store.version()),
    })
}
