//! # RWeb Access Gate
//!
//! File: cli/src/commands/serve/gate.rs
//!
//! ## Overview
//!
//! IP allow-list enforcement. `check` is the pure decision; `access_gate` is
//! the axum middleware that applies it to every request (page, static
//! assets and unmatched paths alike) before any handler runs.
//!
//! Matching is an exact string comparison against the peer IP as printed by
//! `IpAddr`'s `Display`. There is no CIDR support and no normalisation of
//! IPv4-mapped IPv6 addresses (`::ffff:10.0.0.1` does not match `10.0.0.1`).
//! An empty allow-list disables filtering.
//!
use super::options::ResolvedConfig;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use html_escape::encode_text;
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decision for one client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// # Check Client Address (`check`)
pub fn check(client: &str, allowed: &BTreeSet<String>) -> Access {
    if allowed.is_empty() || allowed.contains(client) {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// # Access Gate Middleware (`access_gate`)
///
/// Looks up the peer address from `ConnectInfo` and either forwards the
/// request or answers 403 with `forbidden_page`.
pub async fn access_gate(
    State(config): State<Arc<ResolvedConfig>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let client = peer.ip().to_string();
    match check(&client, &config.allowed_ips) {
        Access::Allow => {
            debug!("Allowed {} {}", client, request.uri());
            next.run(request).await
        }
        Access::Deny => {
            warn!("Denied {} {}", client, request.uri());
            (StatusCode::FORBIDDEN, forbidden_page(&client)).into_response()
        }
    }
}

/// The 403 body.
pub fn forbidden_page(client: &str) -> Html<String> {
    let client = encode_text(client);
    Html(format!(
        "<h1>Forbidden</h1>\n\
         <p>Your IP address {client} is not allowed to access this resource.</p>\n\
         <p>Please contact the server administrator to add your IP address to the allowed list in the config.yaml file.</p>\n"
    ))
}
