//! Static file surface for unmatched paths.
//!
//! A development convenience, not part of the forwarding contract: lets the
//! browser client be served from the same origin as the API proxy so no
//! CORS setup is needed locally.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Content type by file extension. Everything unknown is served as an
/// opaque byte stream.
fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Serve a file from the configured root.
///
/// "/" maps to index.html. Missing files get the 404 page; any other
/// filesystem error is reported as a 500 with the raw error kind — the only
/// place an error-kind distinction reaches the client.
pub async fn serve(root: &Path, uri_path: &str) -> Response {
    // Strip traversal components before touching the filesystem. The second
    // trim keeps the remainder relative so join() cannot escape the root.
    let clean = uri_path.trim_start_matches('/').replace("..", "");
    let relative = clean.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };
    let file_path = root.join(relative);

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type =
                content_type_for(file_path.extension().and_then(|e| e.to_str()));
            ([(header::CONTENT_TYPE, content_type)], content).into_response()
        }
        Err(e) if e.kind() == ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html")],
            "<h1>404 - File Not Found</h1>",
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                path = %file_path.display(),
                error = %e,
                "Failed to read static file"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server Error: {:?}", e.kind()),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_table() {
        assert_eq!(content_type_for(Some("html")), "text/html");
        assert_eq!(content_type_for(Some("js")), "text/javascript");
        assert_eq!(content_type_for(Some("css")), "text/css");
        assert_eq!(content_type_for(Some("json")), "application/json");
        assert_eq!(content_type_for(Some("png")), "image/png");
        assert_eq!(content_type_for(Some("jpg")), "image/jpg");
        assert_eq!(content_type_for(Some("gif")), "image/gif");
        assert_eq!(content_type_for(Some("wasm")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
    }
}
