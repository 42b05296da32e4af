use std::convert::Infallible;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use bytes::Bytes;
use futures::stream;
use reqwest::Url;
use tempfile::TempDir;

use markdown_gateway::application::ports::{ConversionContext, ConverterError, UrlConverter};
use markdown_gateway::application::services::TempWorkspace;
use markdown_gateway::infrastructure::conversion::{ConverterFactory, WebPageConverter};

use crate::support::{leftover_artifacts, spawn_server};

const MAX_BYTES: u64 = 1024;

fn remote_router() -> Router {
    Router::new()
        .route(
            "/page",
            get(|| async {
                Html("<html><head><title>Home</title></head><body><h1>Hello</h1><p>World</p></body></html>")
            }),
        )
        .route(
            "/data.csv",
            get(|| async { ([(CONTENT_TYPE, "text/csv")], "a,b\n1,2") }),
        )
        .route(
            "/export",
            get(|| async { ([(CONTENT_TYPE, "application/octet-stream")], "x,y\n3,4") }),
        )
        .route(
            "/blob",
            get(|| async {
                (
                    [(CONTENT_TYPE, "application/octet-stream")],
                    vec![0u8, 159, 146, 150, 255],
                )
            }),
        )
        .route("/large", get(|| async { "z".repeat(4096) }))
        .route(
            "/stream",
            get(|| async {
                let chunks = stream::iter(
                    (0..64).map(|_| Ok::<_, Infallible>(Bytes::from(vec![b'z'; 64]))),
                );
                ([(CONTENT_TYPE, "text/plain")], Body::from_stream(chunks))
            }),
        )
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
}

struct Fixture {
    converter: WebPageConverter,
    base: Url,
    scratch: TempDir,
}

async fn fixture() -> Fixture {
    let scratch = TempDir::new().unwrap();
    let workspace = TempWorkspace::new(scratch.path().to_path_buf()).unwrap();
    let files = ConverterFactory::create(workspace.clone());
    let converter =
        WebPageConverter::new(files, workspace, Duration::from_secs(5), MAX_BYTES).unwrap();
    let addr = spawn_server(remote_router()).await;

    Fixture {
        converter,
        base: Url::parse(&format!("http://{addr}/")).unwrap(),
        scratch,
    }
}

#[tokio::test]
async fn given_html_page_when_converting_then_renders_markdown_with_content_type() {
    let fixture = fixture().await;
    let url = fixture.base.join("page").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await
        .unwrap();

    assert!(result.markdown.contains("Hello"));
    assert!(result.markdown.contains("World"));
    assert!(result.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn given_csv_resource_when_converting_then_uses_file_converter_and_cleans_up() {
    let fixture = fixture().await;
    let url = fixture.base.join("data.csv").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await
        .unwrap();

    assert_eq!(result.markdown, "| a | b |\n| --- | --- |\n| 1 | 2 |");
    assert_eq!(result.content_type.as_deref(), Some("text/csv"));
    assert!(leftover_artifacts(fixture.scratch.path()).is_empty());
}

#[tokio::test]
async fn given_generic_content_type_when_converting_then_falls_back_to_sniffing() {
    let fixture = fixture().await;
    let url = fixture.base.join("export").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await
        .unwrap();

    assert_eq!(result.markdown, "x,y\n3,4");
}

#[tokio::test]
async fn given_unrecognisable_binary_when_converting_then_returns_unsupported() {
    let fixture = fixture().await;
    let url = fixture.base.join("blob").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn given_error_status_when_converting_then_returns_fetch_failed() {
    let fixture = fixture().await;
    let url = fixture.base.join("missing").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::FetchFailed(msg)) if msg.contains("404")));
}

#[tokio::test]
async fn given_body_over_limit_when_converting_then_returns_fetch_failed() {
    let fixture = fixture().await;
    let url = fixture.base.join("large").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::FetchFailed(_))));
    assert!(leftover_artifacts(fixture.scratch.path()).is_empty());
}

#[tokio::test]
async fn given_unreachable_host_when_converting_then_returns_fetch_failed() {
    let fixture = fixture().await;
    let url = Url::parse("http://127.0.0.1:9/nothing").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::FetchFailed(_))));
}

#[tokio::test]
async fn given_chunked_body_over_limit_when_converting_then_returns_fetch_failed() {
    let fixture = fixture().await;
    let url = fixture.base.join("stream").unwrap();

    let result = fixture
        .converter
        .convert_url(&url, &ConversionContext::default())
        .await;

    assert!(matches!(result, Err(ConverterError::FetchFailed(msg)) if msg.contains("byte limit")));
    assert!(leftover_artifacts(fixture.scratch.path()).is_empty());
}
