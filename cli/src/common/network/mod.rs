//! # RWeb Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Port availability probing. Before the real listener starts, the server
//! binds the configured address once and immediately releases it, so that an
//! occupied port is reported as a clean startup error instead of a bind
//! failure halfway through initialisation.
//!
//! ```rust
//! match network::probe_port(addr).await? {
//!     PortStatus::Free => { /* safe to bind */ }
//!     PortStatus::InUse => anyhow::bail!(RwebError::PortInUse { addr }),
//! }
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::ErrorKind;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::debug;

/// Outcome of a bind-and-release probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    Free,
    InUse,
}

/// # Probe Port (`probe_port`)
///
/// Binds `addr`, drops the listener, and reports whether the port was free.
///
/// ## Errors
///
/// Bind failures other than "address in use" (permission denied, address not
/// available on this host, ...) are returned as errors with the address attached.
pub async fn probe_port(addr: SocketAddr) -> Result<PortStatus> {
    match TcpListener::bind(addr).await {
        Ok(listener) => {
            // Release immediately so the real listener can take the port.
            drop(listener);
            debug!("Port probe on {} succeeded", addr);
            Ok(PortStatus::Free)
        }
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            debug!("Port probe on {} found the address in use", addr);
            Ok(PortStatus::InUse)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to probe address {}", addr)),
    }
}
