//! # RWeb UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! Terminal interaction helpers. Currently only confirmation prompts, used
//! before an existing config file is overwritten.

/// Yes/no confirmation (`Confirm` trait, `StdinConfirm`, `FixedAnswer`).
pub mod prompts;
