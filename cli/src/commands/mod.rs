//! # RWeb Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The modes `main.rs` dispatches to. `rweb` has no subcommands; the mode is
//! chosen by flags:
//!
//! - `serve`: the default, runs the HTTP server
//! - `config`: `--list-config` and `--generate-config`
//!

/// Config file inspection and generation.
pub mod config;
/// The page server: option resolution, preflight, access gate, handlers.
pub mod serve;
