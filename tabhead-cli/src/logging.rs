use std::io::IsTerminal;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Local;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows `-v`:
/// none = warn, `-v` = info, `-vv` = debug.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ANSI color codes
struct Colors {
    reset: &'static str,
    dim: &'static str,
    green: &'static str,
    yellow: &'static str,
    red: &'static str,
    cyan: &'static str,
    blue: &'static str,
    magenta: &'static str,
    gray: &'static str,
}

impl Colors {
    fn new() -> Self {
        if std::io::stderr().is_terminal() {
            Self {
                reset: "\x1b[0m",
                dim: "\x1b[2m",
                green: "\x1b[92m",   // 2xx success
                yellow: "\x1b[93m",  // 3xx redirect
                red: "\x1b[91m",     // 4xx, 5xx errors
                cyan: "\x1b[96m",    // Method
                blue: "\x1b[94m",    // Path
                magenta: "\x1b[95m", // Duration
                gray: "\x1b[90m",    // DEBUG content
            }
        } else {
            Self {
                reset: "",
                dim: "",
                green: "",
                yellow: "",
                red: "",
                cyan: "",
                blue: "",
                magenta: "",
                gray: "",
            }
        }
    }

    fn status_color(&self, status: StatusCode) -> &'static str {
        let code = status.as_u16();
        if (200..300).contains(&code) {
            self.green
        } else if (300..400).contains(&code) {
            self.yellow
        } else {
            self.red
        }
    }
}

/// Request headers worth showing at DEBUG level for static file requests.
const DEBUG_REQUEST_HEADERS: &[&str] = &["user-agent", "range", "if-modified-since", "if-none-match"];

/// Response headers worth showing at DEBUG level.
const DEBUG_RESPONSE_HEADERS: &[&str] = &["content-type", "content-length", "last-modified"];

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}

fn format_headers(headers: &HeaderMap, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| {
            headers
                .get(*name)
                .map(|value| format!("{name}: {}", String::from_utf8_lossy(value.as_bytes())))
        })
        .collect()
}

/// Access log for the static file server.
///
/// `verbose == 0` logs nothing, `1` logs one summary line per request,
/// `2+` also logs selected request and response headers.
#[derive(Clone)]
pub struct LoggingMiddleware {
    pub verbose: u8,
}

impl LoggingMiddleware {
    #[must_use]
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    #[allow(clippy::print_stderr)]
    pub async fn handle(&self, request: Request, next: Next) -> Response {
        if self.verbose == 0 {
            return next.run(request).await;
        }

        let colors = Colors::new();
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        if self.verbose >= 2 {
            let lines = format_headers(request.headers(), DEBUG_REQUEST_HEADERS);
            if !lines.is_empty() {
                eprintln!(
                    "{} - DEBUG - {}Request headers:{}\n{}{}{}",
                    timestamp(),
                    colors.dim,
                    colors.reset,
                    colors.gray,
                    lines.join("\n"),
                    colors.reset
                );
            }
        }

        let response = next.run(request).await;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        let status = response.status();

        // Use eprintln! directly to avoid tracing's escaping of ANSI codes
        eprintln!(
            "{} - INFO - {}{}{} {}{}{} -> {}{}{} in {}{:.1}ms{}",
            timestamp(),
            colors.cyan,
            method,
            colors.reset,
            colors.blue,
            uri.path(),
            colors.reset,
            colors.status_color(status),
            status.as_u16(),
            colors.reset,
            colors.magenta,
            duration_ms,
            colors.reset
        );

        if self.verbose >= 2 {
            let lines = format_headers(response.headers(), DEBUG_RESPONSE_HEADERS);
            if !lines.is_empty() {
                eprintln!(
                    "{} - DEBUG - {}Response headers:{}\n{}{}{}",
                    timestamp(),
                    colors.dim,
                    colors.reset,
                    colors.gray,
                    lines.join("\n"),
                    colors.reset
                );
            }
        }

        response
    }
}

/// `axum::middleware::from_fn_with_state` adapter for [`LoggingMiddleware`].
pub async fn log_requests(
    State(logging): State<LoggingMiddleware>,
    request: Request,
    next: Next,
) -> Response {
    logging.handle(request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_format_headers_keeps_order_and_skips_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));

        let lines = format_headers(&headers, DEBUG_RESPONSE_HEADERS);
        assert_eq!(lines, vec!["content-type: text/csv", "content-length: 42"]);
    }

    #[test]
    fn test_status_color_buckets() {
        let colors = Colors {
            reset: "",
            dim: "",
            green: "g",
            yellow: "y",
            red: "r",
            cyan: "",
            blue: "",
            magenta: "",
            gray: "",
        };
        assert_eq!(colors.status_color(StatusCode::OK), "g");
        assert_eq!(colors.status_color(StatusCode::MOVED_PERMANENTLY), "y");
        assert_eq!(colors.status_color(StatusCode::NOT_FOUND), "r");
    }
}
