//! Router-level tests for the status responder.
//!
//! Each test writes a result file to a temporary directory and drives the
//! router in-process with `oneshot`, without binding a socket.
//!
//! Run with: cargo test --test responder_tests

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use status_responder::config::{ReadErrorPolicy, ResultFileConfig};
use status_responder::routes::create_router;
use status_responder::state::AppState;

const BODY_LIMIT: usize = 64 * 1024;

/// A result file in its own temporary directory.
struct ResultFile {
    dir: TempDir,
}

impl ResultFile {
    fn new(content: &str) -> Self {
        let file = Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        };
        file.write(content);
        file
    }

    fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("result")
    }

    fn write(&self, content: &str) {
        std::fs::write(self.path(), content).expect("write result file");
    }

    fn remove(&self) {
        std::fs::remove_file(self.path()).expect("remove result file");
    }
}

fn router_for(path: &Path) -> Router {
    let config = ResultFileConfig {
        path: path.to_string_lossy().into_owned(),
        on_read_error: ReadErrorPolicy::Respond,
    };
    create_router(AppState::new(&config))
}

async fn request(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    request(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_ok_result() {
    let file = ResultFile::new("200 OK");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_service_unavailable_result() {
    let file = ResultFile::new("503 Service Unavailable");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Service Unavailable");
}

#[tokio::test]
async fn test_non_numeric_code() {
    let file = ResultFile::new("abc unhealthy");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("invalid status code"), "body: {}", body);
    assert!(!body.contains("invalid status code value"), "body: {}", body);
}

#[tokio::test]
async fn test_out_of_range_code() {
    let file = ResultFile::new("999 weird");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("invalid status code value"), "body: {}", body);
}

#[tokio::test]
async fn test_missing_delimiter() {
    let file = ResultFile::new("unhealthy");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("format"), "body: {}", body);
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn test_body_is_verbatim() {
    let file = ResultFile::new("418 short and stout\nsecond line\n");
    let (status, body) = get(router_for(&file.path()), "/").await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body, "short and stout\nsecond line\n");
}

#[tokio::test]
async fn test_any_method_and_path() {
    let file = ResultFile::new("502 upstream down");
    let app = router_for(&file.path());

    for (method, uri) in [
        (Method::GET, "/"),
        (Method::GET, "/healthz"),
        (Method::POST, "/deeply/nested/path?x=1"),
        (Method::PUT, "/"),
        (Method::DELETE, "/anything"),
    ] {
        let (status, body) = request(app.clone(), method.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "{} {}", method, uri);
        assert_eq!(body, "upstream down", "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let file = ResultFile::new("200 all good");
    let app = router_for(&file.path());

    let first = get(app.clone(), "/").await;
    let second = get(app.clone(), "/").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_file_changes_are_picked_up() {
    let file = ResultFile::new("200 OK");
    let app = router_for(&file.path());
    assert_eq!(get(app.clone(), "/").await.0, StatusCode::OK);

    file.write("500 server is unhealthy");
    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "server is unhealthy");

    file.write("garbage");
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("format"), "body: {}", body);
}

#[tokio::test]
async fn test_unreadable_file_keeps_serving_with_respond_policy() {
    let file = ResultFile::new("200 OK");
    let app = router_for(&file.path());

    file.remove();
    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Failed to read result file"), "body: {}", body);

    file.write("200 back");
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "back");
}
