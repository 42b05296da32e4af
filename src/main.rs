use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use markdown_gateway::application::ports::FileConverter;
use markdown_gateway::application::services::{ConversionService, LlmConfigStore, TempWorkspace};
use markdown_gateway::domain::{LlmConfig, LlmProvider};
use markdown_gateway::infrastructure::conversion::{ConverterFactory, WebPageConverter};
use markdown_gateway::infrastructure::llm::RoutedLlmClientFactory;
use markdown_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use markdown_gateway::presentation::config::LlmSettings;
use markdown_gateway::presentation::{AppState, Environment, Settings, create_router};

fn llm_client_factory(settings: &LlmSettings) -> anyhow::Result<RoutedLlmClientFactory> {
    let mut factory = RoutedLlmClientFactory::new(None)?;
    for (name, base_url) in &settings.base_urls {
        match name.parse::<LlmProvider>() {
            Ok(provider) => factory = factory.with_base_url(provider, base_url.clone()),
            Err(e) => tracing::warn!(provider = %name, error = %e, "Ignoring base url override"),
        }
    }
    Ok(factory)
}

/// Installs the LLM configuration from settings when all three values are set.
async fn install_initial_llm(store: &LlmConfigStore, settings: &LlmSettings) -> anyhow::Result<()> {
    let (Some(provider), Some(api_key), Some(model)) = (
        settings.provider.as_deref(),
        settings.api_key.as_deref(),
        settings.model.as_deref(),
    ) else {
        tracing::info!("No LLM configured at startup");
        return Ok(());
    };

    let provider: LlmProvider = provider.parse().map_err(anyhow::Error::msg)?;
    store
        .configure(LlmConfig::new(provider, api_key, model))
        .await
        .context("Failed to install the LLM configuration from settings")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                settings.server.host, settings.server.port
            )
        })?;
    let addr = listener.local_addr()?;

    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            settings.logging.json,
            settings.logging.level.clone(),
        ),
        addr,
    );

    let workspace = match &settings.conversion.temp_dir {
        Some(dir) => TempWorkspace::new(dir.clone())
            .with_context(|| format!("Failed to create temp dir {}", dir.display()))?,
        None => TempWorkspace::system(),
    };
    tracing::info!(temp_dir = %workspace.root().display(), "Temp workspace ready");

    let file_converter = ConverterFactory::create(workspace.clone());
    let url_converter = Arc::new(WebPageConverter::new(
        Arc::clone(&file_converter) as Arc<dyn FileConverter>,
        workspace.clone(),
        settings.conversion.fetch_timeout(),
        settings.conversion.max_upload_bytes as u64,
    )?);

    let llm_config = Arc::new(LlmConfigStore::new(Arc::new(llm_client_factory(
        &settings.llm,
    )?)));
    install_initial_llm(&llm_config, &settings.llm).await?;

    let conversion_service = Arc::new(ConversionService::new(
        file_converter,
        url_converter,
        workspace,
        llm_config,
        settings.conversion.timeout(),
    ));

    let router = create_router(AppState::new(conversion_service, settings.clone()));

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
