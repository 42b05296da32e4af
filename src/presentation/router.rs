use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileConverter, UrlConverter};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    configure_llm_handler, convert_file_handler, convert_files_handler, convert_text_handler,
    convert_url_handler, convert_zip_handler, formats_handler, health_handler, llm_status_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, U>(state: AppState<F, U>) -> Router
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.conversion.max_upload_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route("/formats", get(formats_handler))
        .route(
            "/config/llm",
            post(configure_llm_handler::<F, U>).get(llm_status_handler::<F, U>),
        )
        .route("/convert/file", post(convert_file_handler::<F, U>))
        .route("/convert/files", post(convert_files_handler::<F, U>))
        .route("/convert/url", post(convert_url_handler::<F, U>))
        .route("/convert/text", post(convert_text_handler::<F, U>))
        .route("/convert/zip", post(convert_zip_handler::<F, U>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
