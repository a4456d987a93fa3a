//! # RWeb Page Responder
//!
//! File: cli/src/commands/serve/page.rs
//!
//! ## Overview
//!
//! Answers `GET /`. Each request walks a small state machine:
//!
//! ```text
//! Start ──html_path set──▶ CheckExists ──file present──▶ ServeFile      (200, file body)
//!   │                           └───────missing────────▶ NotFound       (404, names the path)
//!   └────html_path unset───────────────────────────────▶ ServeFallback  (200, default_message)
//! ```
//!
//! A missing file is answered per request; it never stops the server, and a
//! file that appears later is served on the next request. File bodies are
//! streamed by tower-http's `ServeFile`, which also sets the content type
//! from the extension.
//!
use super::options::ResolvedConfig;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use html_escape::encode_text;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, warn};

/// Terminal state for one request to `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    ServeFile(PathBuf),
    NotFound(PathBuf),
    ServeFallback,
}

/// # Decide Page State (`decide`)
///
/// Only regular files count as present; a directory at `html_path` is a 404.
pub fn decide(html_path: Option<&Path>) -> PageState {
    match html_path {
        Some(path) if path.is_file() => PageState::ServeFile(path.to_path_buf()),
        Some(path) => PageState::NotFound(path.to_path_buf()),
        None => PageState::ServeFallback,
    }
}

/// # Root Page Handler (`show_page`)
pub async fn show_page(State(config): State<Arc<ResolvedConfig>>, request: Request) -> Response {
    match decide(config.html_path.as_deref()) {
        PageState::ServeFile(path) => serve_file(&path, request).await,
        PageState::NotFound(path) => {
            warn!("Configured page {} does not exist", path.display());
            not_found(Some(path.as_path()))
        }
        PageState::ServeFallback => {
            debug!("No page configured, serving default message");
            Html(config.default_message.clone()).into_response()
        }
    }
}

async fn serve_file(path: &Path, request: Request) -> Response {
    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    // The file can vanish between the existence check and the open.
    if response.status() == StatusCode::NOT_FOUND {
        return not_found(Some(path));
    }
    response.into_response()
}

/// # Unmatched Route Handler (`fallback`)
///
/// Any path other than `/` and `/static/*` gets the same 404 page as a
/// missing root page.
pub async fn fallback(State(config): State<Arc<ResolvedConfig>>) -> Response {
    not_found(config.html_path.as_deref())
}

/// A 404 response naming the configured page.
pub fn not_found(html_path: Option<&Path>) -> Response {
    (StatusCode::NOT_FOUND, not_found_page(html_path)).into_response()
}

/// The 404 body.
pub fn not_found_page(html_path: Option<&Path>) -> Html<String> {
    let requested = html_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let requested = encode_text(&requested);
    Html(format!(
        "<h1>File Not Found</h1>\n\
         <p>The file you requested could not be found on the server.</p>\n\
         <p>Requested file: {requested}</p>\n\
         <p>Please check the path and try again.</p>\n"
    ))
}
