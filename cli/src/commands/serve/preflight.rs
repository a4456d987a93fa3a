//! # RWeb Startup Preflight
//!
//! File: cli/src/commands/serve/preflight.rs
//!
//! ## Overview
//!
//! Checks that must pass before the listener is created. Both are fatal:
//! the caller reports the error and exits with status 1 without starting
//! the server.
//!
//! 1. Ports below 1024 require elevated privileges.
//! 2. The listen address and port must not already be bound. This is checked
//!    with a bind-and-release probe that holds nothing afterwards.
//!
use super::options::ResolvedConfig;
use crate::common::network::{self, PortStatus};
use crate::core::error::{Result, RwebError};
use std::net::SocketAddr;
use tracing::debug;

/// Lowest port that can be bound without privileges.
pub const FIRST_UNPRIVILEGED_PORT: u16 = 1024;

/// # Validate Startup Conditions (`validate`)
///
/// ## Errors
///
/// - `RwebError::Privilege` for a port below 1024 when not privileged.
/// - `RwebError::PortInUse` if the address is already bound.
/// - Any other probe failure, with the address as context.
pub async fn validate(resolved: &ResolvedConfig, is_privileged: bool) -> Result<()> {
    if resolved.port < FIRST_UNPRIVILEGED_PORT && !is_privileged {
        anyhow::bail!(RwebError::Privilege {
            port: resolved.port
        });
    }

    let addr = SocketAddr::new(resolved.listen, resolved.port);
    match network::probe_port(addr).await? {
        PortStatus::Free => {
            debug!("Preflight passed for {}", addr);
            Ok(())
        }
        PortStatus::InUse => Err(RwebError::PortInUse { addr }.into()),
    }
}
