//! # RWeb HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! Builds the axum router and runs the listener.
//!
//! ## Architecture
//!
//! The router has three endpoints, all behind the access gate:
//! - `GET /` → `page::show_page`
//! - `/static/*` → `ServeDir` over the static directory (read-only)
//! - anything else → `page::fallback` (404)
//!
//! The resolved configuration is shared as `Arc<ResolvedConfig>` router state.
//! The server is started with `into_make_service_with_connect_info` so the
//! gate can see each peer address, and shuts down gracefully on Ctrl+C or
//! SIGTERM.
//!
use super::gate;
use super::options::ResolvedConfig;
use super::page;
use crate::core::error::Result;
use anyhow::Context;
use axum::routing::get;
use axum::{middleware, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info};

/// # Run HTTP Server (`run_server`)
///
/// Prints the startup summary, binds the configured address and serves until
/// a shutdown signal arrives. Preflight has already released its probe, so
/// the bind here is the first real claim on the port.
pub async fn run_server(config: ResolvedConfig) -> Result<()> {
    let config = Arc::new(config);
    let addr = SocketAddr::new(config.listen, config.port);

    println!("\n=================================================================");
    match &config.html_path {
        Some(path) => println!("📄 Serving page:      {}", path.display()),
        None => println!("💬 Serving message:   {}", config.default_message),
    }
    println!("📂 Static files:      {}", config.static_directory.display());
    println!("⚙️  Binding to address: {}", addr);
    if config.allowed_ips.is_empty() {
        println!("🔓 Allowed IPs:       (any)");
    } else {
        let ips: Vec<&str> = config.allowed_ips.iter().map(String::as_str).collect();
        println!("🔒 Allowed IPs:       {}", ips.join(", "));
    }
    println!("=================================================================\n");
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;
    info!("Listening on {}", addr);

    serve(listener, config, shutdown_signal()).await?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Serve on Listener (`serve`)
///
/// Serves the app on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, config: Arc<ResolvedConfig>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app(config);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("HTTP server failed")
}

/// # Create Axum Application (`create_app`)
///
/// The gate is added last so it wraps every route and the fallback.
pub fn create_app(config: Arc<ResolvedConfig>) -> Router {
    let static_service = ServeDir::new(&config.static_directory);

    Router::new()
        .route("/", get(page::show_page))
        .nest_service("/static", static_service)
        .fallback(page::fallback)
        .layer(middleware::from_fn_with_state(
            config.clone(),
            gate::access_gate,
        ))
        .with_state(config)
}

/// # Handle Shutdown Signal (`shutdown_signal`)
///
/// Resolves on Ctrl+C, or SIGTERM on Unix. A handler that fails to install
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
