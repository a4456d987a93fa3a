//! # RWeb CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// An `assert_cmd::Command` for the compiled `rweb` binary, running in `cwd`
/// with `HOME` pointed at `home` so no real config file is picked up.
pub fn rweb_cmd_in(cwd: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rweb").expect("Failed to find rweb binary for testing");
    cmd.current_dir(cwd).env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Whether the tests run as root (privileged-port checks behave differently).
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
