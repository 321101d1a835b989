#![allow(clippy::unwrap_used)]
//! Integration tests for the static file server.

use std::fs;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tabhead_cli::cli::run_serve;
use tabhead_cli::server::{ServeConfig, ServeError, bind, router, serve};
use tempfile::TempDir;
use tower::ServiceExt;

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.html"), "<h1>census</h1>").unwrap();
    fs::write(tmp.path().join("ALB_CN_1870.csv"), "county,town\n").unwrap();
    fs::create_dir(tmp.path().join("resources")).unwrap();
    fs::write(tmp.path().join("resources").join("app.js"), "console.log(1);").unwrap();
    tmp
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_serves_file_contents() {
    let tmp = site();
    let (status, body) = get(router(tmp.path(), 0), "/ALB_CN_1870.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"county,town\n");
}

#[tokio::test]
async fn test_serves_nested_file() {
    let tmp = site();
    let (status, body) = get(router(tmp.path(), 0), "/resources/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log(1);");
}

#[tokio::test]
async fn test_directory_serves_index() {
    let tmp = site();
    let (status, body) = get(router(tmp.path(), 0), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>census</h1>");
}

#[tokio::test]
async fn test_directory_without_index_is_listed() {
    let tmp = site();
    fs::create_dir(tmp.path().join("resources").join("maps")).unwrap();

    let (status, body) = get(router(tmp.path(), 0), "/resources/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("<h1>Directory listing for /resources/</h1>"), "got: {page}");
    assert!(page.contains("<a href=\"app.js\">app.js</a>"), "got: {page}");
    assert!(page.contains("<a href=\"maps/\">maps/</a>"), "got: {page}");
}

#[tokio::test]
async fn test_missing_directory_is_not_found() {
    let tmp = site();
    let (status, _) = get(router(tmp.path(), 0), "/census/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let tmp = site();
    let (status, _) = get(router(tmp.path(), 1), "/ALB_CN_1890.csv").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_verbose_logging_passes_response_through() {
    let tmp = site();
    let (status, body) = get(router(tmp.path(), 2), "/ALB_CN_1870.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"county,town\n");
}

#[tokio::test]
async fn test_bind_busy_port_is_reported() {
    let held = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = held.local_addr().unwrap().port();

    let err = bind(port).await.unwrap_err();
    assert!(matches!(err, ServeError::PortBusy { port: p, .. } if p == port));
    assert!(
        err.to_string().starts_with(&format!("Port {port} is likely busy. Error: ")),
        "got: {err}"
    );
}

#[tokio::test]
async fn test_serve_rejects_missing_root() {
    let tmp = TempDir::new().unwrap();
    let config = ServeConfig {
        root: tmp.path().join("no_such_dir"),
        port: 0,
        ..ServeConfig::default()
    };

    let err = serve(&config).await.unwrap_err();
    assert!(matches!(err, ServeError::RootNotADirectory { .. }));
}

#[tokio::test]
async fn test_run_serve_busy_port_suggests_another() {
    let tmp = site();
    let held = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = held.local_addr().unwrap().port();
    let config = ServeConfig {
        port,
        root: tmp.path().to_path_buf(),
        ..ServeConfig::default()
    };

    let err = run_serve(&config).await.unwrap_err().to_string();
    assert!(
        err.starts_with(&format!("Port {port} is likely busy. Error: ")),
        "got: {err}"
    );
    assert!(err.contains("Try another --port"), "got: {err}");
}
