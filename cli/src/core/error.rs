//! # RWeb Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout rweb. Fatal startup
//! conditions get their own variant so callers (and tests) can tell them apart,
//! while everything else travels as `anyhow::Error` with context attached.
//!
//! ## Architecture
//!
//! - `RwebError`: a `thiserror` enum for the failure kinds the server reports
//!   to the operator (bad configuration, privilege, port already bound).
//! - `Result<T>`: an alias for `anyhow::Result<T>`.
//!
//! Per-request outcomes (403 for a denied address, 404 for a missing page) are
//! HTTP responses, not errors, and never reach this module.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if port < 1024 && !privileged {
//!     anyhow::bail!(RwebError::Privilege { port });
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<RwebError>(), Some(RwebError::PortInUse { .. })) => {
//!         println!("Pick another port");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for rweb.
#[derive(Error, Debug)]
pub enum RwebError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file {}: {}", .path.display(), .message)]
    ConfigParse { path: PathBuf, message: String },

    #[error("You must run with elevated privileges to bind to ports below 1024 (requested port {port}).")]
    Privilege { port: u16 },

    #[error("Port {} is already in use on {}.", .addr.port(), .addr.ip())]
    PortInUse { addr: SocketAddr },

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
