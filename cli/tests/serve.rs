//! # RWeb Serve Mode Integration Tests
//!
//! File: cli/tests/serve.rs
//!
//! Startup failures end the process before the listener starts, so they can
//! be asserted through the binary. Request handling itself is covered by the
//! router tests in `server_logic.rs`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::net::TcpListener;
use tempfile::tempdir;

#[test]
fn test_privileged_port_requires_root() {
    if running_as_root() {
        return;
    }
    let cwd = tempdir().unwrap();
    let home = tempdir().unwrap();

    rweb_cmd_in(cwd.path(), home.path())
        .args(["--port", "80", "--listen", "127.0.0.1"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Using fallback values"))
        .stderr(predicate::str::contains("elevated privileges"));
}

#[test]
fn test_port_in_use_is_fatal() {
    let cwd = tempdir().unwrap();
    let home = tempdir().unwrap();
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    rweb_cmd_in(cwd.path(), home.path())
        .args(["--listen", "127.0.0.1", "--port"])
        .arg(port.to_string())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already in use"));
}

#[test]
fn test_malformed_config_is_fatal() {
    let cwd = tempdir().unwrap();
    let home = tempdir().unwrap();
    let config = cwd.path().join("broken.yaml");
    fs::write(&config, "allowed_ips: [127.0.0.1\n").unwrap();

    rweb_cmd_in(cwd.path(), home.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_loaded_config_is_reported() {
    let cwd = tempdir().unwrap();
    let home = tempdir().unwrap();
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();
    let config = cwd.path().join("site.yaml");
    fs::write(&config, format!("listen: 127.0.0.1\nport: {port}\n")).unwrap();

    // The occupied port stops startup right after the source is reported.
    rweb_cmd_in(cwd.path(), home.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Loaded configuration from:"))
        .stderr(predicate::str::contains("already in use"));
}

#[test]
fn test_invalid_listen_address_is_fatal() {
    let cwd = tempdir().unwrap();
    let home = tempdir().unwrap();

    rweb_cmd_in(cwd.path(), home.path())
        .args(["--listen", "not-an-ip", "--port", "8080"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a valid IP address"));
}
