//! # RWeb Page Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! The default mode of `rweb`: serve one page (or a fallback message) at `/`
//! to an allow-list of client addresses.
//!
//! ## Architecture
//!
//! - `options.rs`: merging flags, config file and fallbacks into `ResolvedConfig`
//! - `preflight.rs`: privilege and port-in-use checks before binding
//! - `gate.rs`: the IP allow-list middleware
//! - `page.rs`: the `/` handler and the 404 page
//! - `server_logic.rs`: router assembly and the listener
//!
//! Startup flow:
//! 1. Locate and load the config file
//! 2. Resolve options and report where they came from
//! 3. Run preflight (exit 1 on failure)
//! 4. Serve until Ctrl+C / SIGTERM
//!
//! ```bash
//! rweb --port 9090 --ips 127.0.0.1 192.168.1.20 --path /srv/www/status.html
//! ```
//!
use crate::common::system;
use crate::core::config::{self, ConfigLocations};
use crate::core::error::Result;
use tracing::info;

pub use options::ServeArgs;

/// Merges flags, config file and fallbacks.
pub mod options;

/// Startup checks run before the listener binds.
pub mod preflight;

/// IP allow-list decision and middleware.
pub mod gate;

/// Root page state machine and 404 responses.
pub mod page;

/// Router construction and the axum listener.
pub mod server_logic;

/// # Handle Serve (`handle_serve`)
///
/// Entry point for the default mode.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve with args: {:?}", args);

    let privileged = system::is_privileged();
    let locations = ConfigLocations::from_env()?;
    let config_path = config::resolve_path(args.config.as_deref(), privileged, &locations);
    let loaded = config::load(&config_path)?;

    let resolved = options::resolve(&args, &loaded)?;
    options::report_source(&config_path, &resolved, &mut std::io::stdout())?;
    info!("Effective server config: {:?}", resolved);

    preflight::validate(&resolved, privileged).await?;

    server_logic::run_server(resolved).await
}
