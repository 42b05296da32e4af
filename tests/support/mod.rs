use std::io::{Cursor, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use tempfile::TempDir;
use tower::ServiceExt;
use zip::write::SimpleFileOptions;

use markdown_gateway::application::ports::{FileConverter, UrlConverter};
use markdown_gateway::application::services::{
    ARTIFACT_PREFIX, ConversionService, LlmConfigStore, TempWorkspace,
};
use markdown_gateway::infrastructure::conversion::{ConverterFactory, WebPageConverter};
use markdown_gateway::infrastructure::llm::MockLlmClientFactory;
use markdown_gateway::presentation::{AppState, Settings, create_router};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const MOCK_CAPTION: &str = "A red square on a white background.";

pub struct TestApp {
    pub router: Router,
    pub temp_dir: TempDir,
    pub llm_config: Arc<LlmConfigStore>,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub fn leftover_artifacts(&self) -> Vec<PathBuf> {
        leftover_artifacts(self.temp_dir.path())
    }
}

pub fn leftover_artifacts(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARTIFACT_PREFIX))
        })
        .collect()
}

/// Router backed by the built-in converters and a mock LLM factory.
pub fn test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let workspace = TempWorkspace::new(temp_dir.path().to_path_buf()).unwrap();
    let file_converter = ConverterFactory::create(workspace.clone());
    let url_converter = Arc::new(
        WebPageConverter::new(
            Arc::clone(&file_converter) as Arc<dyn FileConverter>,
            workspace.clone(),
            TEST_TIMEOUT,
            10 * 1024 * 1024,
        )
        .unwrap(),
    );

    build_app(temp_dir, workspace, file_converter, url_converter, TEST_TIMEOUT)
}

pub fn test_app_with<F, U>(file_converter: Arc<F>, url_converter: Arc<U>, timeout: Duration) -> TestApp
where
    F: FileConverter + 'static,
    U: UrlConverter + 'static,
{
    let temp_dir = TempDir::new().unwrap();
    let workspace = TempWorkspace::new(temp_dir.path().to_path_buf()).unwrap();
    build_app(temp_dir, workspace, file_converter, url_converter, timeout)
}

fn build_app<F, U>(
    temp_dir: TempDir,
    workspace: TempWorkspace,
    file_converter: Arc<F>,
    url_converter: Arc<U>,
    timeout: Duration,
) -> TestApp
where
    F: FileConverter + ?Sized + 'static,
    U: UrlConverter + ?Sized + 'static,
{
    let llm_config = Arc::new(LlmConfigStore::new(Arc::new(MockLlmClientFactory::new(
        MOCK_CAPTION,
    ))));
    let service = Arc::new(ConversionService::new(
        file_converter,
        url_converter,
        workspace,
        Arc::clone(&llm_config),
        timeout,
    ));

    TestApp {
        router: create_router(AppState::new(service, Settings::default())),
        temp_dir,
        llm_config,
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_lines(response: Response<Body>) -> Vec<serde_json::Value> {
    let bytes = body_bytes(response).await;
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "----markdown-gateway-test-boundary";

/// Hand-assembled `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, field: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        write!(
            self.body,
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .unwrap();
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn request(mut self, uri: &str) -> Request<Body> {
        write!(self.body, "--{BOUNDARY}--\r\n").unwrap();
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Builds an in-memory zip. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// PNG signature and IHDR header; enough for format and size detection.
pub fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 2, 0, 0, 0]);
    data
}

/// Serves `router` on an ephemeral local port for the rest of the test.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
