//! # RWeb Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers that are not specific to one mode:
//!
//! - **`fs`**: reading and writing whole files, creating directories.
//! - **`network`**: bind-and-release port probing.
//! - **`system`**: privilege detection.
//! - **`ui`**: confirmation prompts.
//!

/// Filesystem I/O helpers.
pub mod fs;
/// Port availability probing.
pub mod network;
/// Execution context checks (effective uid).
pub mod system;
/// Terminal prompts.
pub mod ui;
