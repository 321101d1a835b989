//! Static file server.
//!
//! Serves files under a root directory over HTTP GET until interrupted. A
//! directory without an `index.html` gets a generated listing. A failed bind
//! is reported once and never retried.

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Router, middleware};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::logging::{LoggingMiddleware, log_requests};

pub const DEFAULT_PORT: u16 = 5500;

/// Bytes percent-encoded in listing links; unreserved marks stay literal.
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub port: u16,
    pub root: PathBuf,
    /// Access log verbosity, see [`LoggingMiddleware`].
    pub verbose: u8,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            verbose: 0,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServeError {
    #[error("Port {port} is likely busy. Error: {source}")]
    PortBusy {
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("Root is not a directory: {}", root.display())]
    RootNotADirectory { root: PathBuf },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Router serving `root`. Directory requests get `index.html` when present,
/// otherwise a listing of the directory's entries.
#[must_use]
pub fn router(root: &Path, verbose: u8) -> Router {
    let listing = directory_listing.with_state(root.to_path_buf());
    Router::new()
        .fallback_service(ServeDir::new(root).fallback(listing))
        .layer(middleware::from_fn_with_state(
            LoggingMiddleware::new(verbose),
            log_requests,
        ))
}

/// Bind the listening socket on all interfaces.
///
/// # Errors
///
/// Returns [`ServeError::PortBusy`] if the port cannot be bound.
pub async fn bind(port: u16) -> Result<TcpListener, ServeError> {
    TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| ServeError::PortBusy { port, source })
}

/// Serve `config.root` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the root is not a directory, the port cannot be bound,
/// or the server fails while running.
#[allow(clippy::print_stdout)]
pub async fn serve(config: &ServeConfig) -> Result<(), ServeError> {
    if !config.root.is_dir() {
        return Err(ServeError::RootNotADirectory {
            root: config.root.clone(),
        });
    }

    let listener = bind(config.port).await?;
    let port = listener.local_addr()?.port();

    println!("Serving at http://localhost:{port}");
    info!(root = %config.root.display(), port, "static file server started");

    axum::serve(listener, router(&config.root, config.verbose))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("static file server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
}

/// Fallback for paths `ServeDir` could not answer with a file.
async fn directory_listing(State(root): State<PathBuf>, request: Request) -> Response {
    let (parts, _) = request.into_parts();
    let Some((dir, display_path)) = listed_dir(root, parts.uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match read_entries(&dir).await {
        Ok(entries) => Html(listing_page(&display_path, &entries)).into_response(),
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "no listing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Map a request path ending in `/` to a directory under `root`.
///
/// Returns the directory and the decoded path for display, or `None` for
/// non-directory paths and paths that try to leave `root`.
fn listed_dir(root: PathBuf, request_path: &str) -> Option<(PathBuf, String)> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    if !decoded.ends_with('/') {
        return None;
    }

    let mut dir = root;
    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') {
            return None;
        }
        dir.push(segment);
    }
    Some((dir, decoded.into_owned()))
}

async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
    Ok(entries)
}

fn listing_page(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(display_path);
    let items = entries
        .iter()
        .map(|entry| {
            let suffix = if entry.is_dir { "/" } else { "" };
            format!(
                "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>\n",
                utf8_percent_encode(&entry.name, HREF_ENCODE_SET),
                escape_html(&entry.name)
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {title}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n{items}</ul>\n<hr>\n\
         </body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
