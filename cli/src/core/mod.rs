//! # RWeb Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every mode:
//! - `config`: locating, loading, saving and listing `config.yaml`
//! - `error`: the `RwebError` enum and the `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{Result, RwebError};
//! ```
//!
pub mod config;
pub mod error;
