//! # RWeb System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Queries about the execution context. The server needs exactly one: whether
//! the process runs with elevated privileges, which decides both the config
//! file location and whether ports below 1024 may be bound.
//!

/// Returns `true` when the effective user is root.
#[cfg(unix)]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Non-Unix platforms have no euid; treat the process as unprivileged.
#[cfg(not(unix))]
pub fn is_privileged() -> bool {
    false
}
