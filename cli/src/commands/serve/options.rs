//! # RWeb Option Resolution
//!
//! File: cli/src/commands/serve/options.rs
//!
//! ## Overview
//!
//! This module turns the three configuration sources into the single
//! `ResolvedConfig` the server runs with. Each field is resolved on its own:
//! 1. Command-line flag (highest priority)
//! 2. Value in the loaded config file
//! 3. Built-in fallback (lowest priority)
//!
//! so `--port 9000` can be combined with `allowed_ips` from the file.
//!
//! ## Architecture
//!
//! Resolution happens in two steps:
//! - `merge` applies precedence and produces a fully populated
//!   `PersistedConfig`. This is also what `--generate-config` writes, so the
//!   file keeps paths exactly as the user typed them.
//! - `finalize` validates that record (port range, listen address) and
//!   expands paths: `~` is expanded and relative `html_path` /
//!   `static_directory` values are placed under `default_directory`.
//!
//! An empty string counts as "not given" at every level, for both flags and
//! file values.
//!
use crate::core::config::PersistedConfig;
use crate::core::error::{Result, RwebError};
use clap::Args;
use std::collections::BTreeSet;
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fallback allow-list: only the local machine.
pub const FALLBACK_ALLOWED_IPS: &[&str] = &["127.0.0.1"];
pub const FALLBACK_PORT: u16 = 5000;
/// Listen on all interfaces.
pub const FALLBACK_LISTEN: &str = "0.0.0.0";
pub const FALLBACK_DIRECTORY: &str = ".";
pub const FALLBACK_STATIC_DIR: &str = "static";
pub const FALLBACK_MESSAGE: &str = "Hello World!";

/// # Server Option Flags (`ServeArgs`)
///
/// The command-line overrides. Every flag is optional; an absent flag defers
/// to the config file, then to the fallback.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to the HTML file to display.
    #[arg(short = 'p', long)]
    pub path: Option<String>,

    /// Port to run the server on.
    #[arg(short = 'P', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// List of allowed client IP addresses.
    #[arg(short = 'i', long, num_args = 1..)]
    pub ips: Option<Vec<String>>,

    /// IP address to listen on (default: 0.0.0.0).
    #[arg(short = 'L', long)]
    pub listen: Option<String>,

    /// Path to the config file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Base directory that relative page and static paths are resolved against.
    #[arg(short = 'D', long)]
    pub directory: Option<String>,

    /// Directory to serve static files (e.g. images) from, mounted at /static.
    #[arg(short = 'S', long = "static-dir")]
    pub static_dir: Option<String>,
}

/// # Effective Server Configuration (`ResolvedConfig`)
///
/// The validated, fully defaulted configuration. Built once per invocation
/// and shared read-only with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Client addresses allowed to connect. Empty means no filtering.
    pub allowed_ips: BTreeSet<String>,
    /// The page served at `/`; `None` serves `default_message` instead.
    pub html_path: Option<PathBuf>,
    pub port: u16,
    pub listen: IpAddr,
    pub default_directory: PathBuf,
    pub static_directory: PathBuf,
    pub default_message: String,
}

/// # Resolve Options (`resolve`)
///
/// `merge` followed by `finalize`.
pub fn resolve(cli: &ServeArgs, loaded: &PersistedConfig) -> Result<ResolvedConfig> {
    finalize(&merge(cli, loaded))
}

/// Drops empty strings so they fall through to the next source.
fn given(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// # Merge Sources (`merge`)
///
/// Applies flag > file > fallback to each field independently. Every field of
/// the result is `Some`, except `html_path`, which has no fallback.
pub fn merge(cli: &ServeArgs, loaded: &PersistedConfig) -> PersistedConfig {
    let allowed_ips = cli
        .ips
        .clone()
        .or_else(|| loaded.allowed_ips.clone())
        .unwrap_or_else(|| FALLBACK_ALLOWED_IPS.iter().map(|ip| ip.to_string()).collect());

    PersistedConfig {
        allowed_ips: Some(allowed_ips),
        html_path: given(&cli.path).or_else(|| given(&loaded.html_path)),
        port: Some(cli.port.or(loaded.port).unwrap_or(FALLBACK_PORT)),
        listen: Some(
            given(&cli.listen)
                .or_else(|| given(&loaded.listen))
                .unwrap_or_else(|| FALLBACK_LISTEN.to_string()),
        ),
        default_message: Some(
            loaded
                .default_message
                .clone()
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        ),
        default_directory: Some(
            given(&cli.directory)
                .or_else(|| given(&loaded.default_directory))
                .unwrap_or_else(|| FALLBACK_DIRECTORY.to_string()),
        ),
        static_directory: Some(
            given(&cli.static_dir)
                .or_else(|| given(&loaded.static_directory))
                .unwrap_or_else(|| FALLBACK_STATIC_DIR.to_string()),
        ),
    }
}

/// Expands `~` and anchors relative paths under `base`.
fn expand_path(raw: &str, base: Option<&Path>) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    match base {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    }
}

/// # Finalize Record (`finalize`)
///
/// Validates a merged record and converts it into a `ResolvedConfig`.
/// Missing fields (only possible when called on an unmerged record) take
/// their fallbacks.
///
/// ## Errors
///
/// `RwebError::Config` if the port is 0 or the listen address is not an IP literal.
pub fn finalize(merged: &PersistedConfig) -> Result<ResolvedConfig> {
    let port = merged.port.unwrap_or(FALLBACK_PORT);
    if port == 0 {
        anyhow::bail!(RwebError::Config(
            "port must be between 1 and 65535".to_string()
        ));
    }

    let listen_raw = merged.listen.as_deref().unwrap_or(FALLBACK_LISTEN);
    let listen: IpAddr = listen_raw.parse().map_err(|_| {
        RwebError::Config(format!(
            "listen address '{}' is not a valid IP address",
            listen_raw
        ))
    })?;

    let default_directory = expand_path(
        merged.default_directory.as_deref().unwrap_or(FALLBACK_DIRECTORY),
        None,
    );
    let html_path = merged
        .html_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| expand_path(p, Some(default_directory.as_path())));
    let static_directory = expand_path(
        merged.static_directory.as_deref().unwrap_or(FALLBACK_STATIC_DIR),
        Some(default_directory.as_path()),
    );

    let allowed_ips = match &merged.allowed_ips {
        Some(ips) => ips.iter().cloned().collect(),
        None => FALLBACK_ALLOWED_IPS.iter().map(|ip| ip.to_string()).collect(),
    };

    let resolved = ResolvedConfig {
        allowed_ips,
        html_path,
        port,
        listen,
        default_directory,
        static_directory,
        default_message: merged
            .default_message
            .clone()
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
    };
    debug!("Resolved configuration: {:?}", resolved);
    Ok(resolved)
}

/// # Report Configuration Source (`report_source`)
///
/// Tells the operator where the settings came from: the config file if it
/// exists, otherwise the full list of values in use.
pub fn report_source(config_path: &Path, resolved: &ResolvedConfig, out: &mut impl Write) -> Result<()> {
    if config_path.exists() {
        writeln!(out, "Loaded configuration from: {}", config_path.display())?;
        return Ok(());
    }

    let ips: Vec<&str> = resolved.allowed_ips.iter().map(String::as_str).collect();
    writeln!(out, "No configuration file loaded. Using fallback values:")?;
    writeln!(out, "Allowed IPs: {:?}", ips)?;
    match &resolved.html_path {
        Some(path) => writeln!(out, "HTML Path: {}", path.display())?,
        None => writeln!(out, "HTML Path: (none, serving default message)")?,
    }
    writeln!(out, "Port: {}", resolved.port)?;
    writeln!(out, "Listen: {}", resolved.listen)?;
    writeln!(out, "Default Directory: {}", resolved.default_directory.display())?;
    writeln!(out, "Static Directory: {}", resolved.static_directory.display())?;
    writeln!(out, "Default Message: {}", resolved.default_message)?;
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tempfile::TempDir;

    fn file_record() -> PersistedConfig {
        PersistedConfig {
            allowed_ips: Some(vec!["192.168.1.10".into()]),
            html_path: Some("/srv/www/from-file.html".into()),
            port: Some(8081),
            listen: Some("127.0.0.1".into()),
            default_message: Some("From the file".into()),
            default_directory: Some("/srv/www".into()),
            static_directory: Some("/srv/assets".into()),
        }
    }

    fn set(ips: &[&str]) -> BTreeSet<String> {
        ips.iter().map(|ip| ip.to_string()).collect()
    }

    #[test]
    fn test_fallbacks_when_nothing_given() -> Result<()> {
        let resolved = resolve(&ServeArgs::default(), &PersistedConfig::default())?;

        assert_eq!(resolved.allowed_ips, set(&["127.0.0.1"]));
        assert_eq!(resolved.html_path, None);
        assert_eq!(resolved.port, 5000);
        assert_eq!(resolved.listen, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(resolved.default_directory, PathBuf::from("."));
        assert_eq!(resolved.static_directory, PathBuf::from("./static"));
        assert_eq!(resolved.default_message, "Hello World!");
        Ok(())
    }

    #[test]
    fn test_file_values_used_without_flags() -> Result<()> {
        let resolved = resolve(&ServeArgs::default(), &file_record())?;

        assert_eq!(resolved.allowed_ips, set(&["192.168.1.10"]));
        assert_eq!(resolved.html_path, Some(PathBuf::from("/srv/www/from-file.html")));
        assert_eq!(resolved.port, 8081);
        assert_eq!(resolved.listen.to_string(), "127.0.0.1");
        assert_eq!(resolved.default_directory, PathBuf::from("/srv/www"));
        assert_eq!(resolved.static_directory, PathBuf::from("/srv/assets"));
        assert_eq!(resolved.default_message, "From the file");
        Ok(())
    }

    #[test]
    fn test_flags_override_file() -> Result<()> {
        let cli = ServeArgs {
            path: Some("/tmp/page.html".into()),
            port: Some(9090),
            ips: Some(vec!["10.0.0.1".into(), "10.0.0.2".into()]),
            listen: Some("::1".into()),
            config: None,
            directory: Some("/opt/site".into()),
            static_dir: Some("img".into()),
        };

        let resolved = resolve(&cli, &file_record())?;

        assert_eq!(resolved.allowed_ips, set(&["10.0.0.1", "10.0.0.2"]));
        assert_eq!(resolved.html_path, Some(PathBuf::from("/tmp/page.html")));
        assert_eq!(resolved.port, 9090);
        assert_eq!(resolved.listen.to_string(), "::1");
        assert_eq!(resolved.default_directory, PathBuf::from("/opt/site"));
        assert_eq!(resolved.static_directory, PathBuf::from("/opt/site/img"));
        // No flag exists for the message; the file still supplies it.
        assert_eq!(resolved.default_message, "From the file");
        Ok(())
    }

    /// Overriding one field keeps the others from the file.
    #[test]
    fn test_precedence_is_per_field() -> Result<()> {
        let cli = ServeArgs {
            port: Some(7070),
            ..ServeArgs::default()
        };

        let resolved = resolve(&cli, &file_record())?;

        assert_eq!(resolved.port, 7070);
        assert_eq!(resolved.allowed_ips, set(&["192.168.1.10"]));
        assert_eq!(resolved.listen.to_string(), "127.0.0.1");
        Ok(())
    }

    /// A flag for a field the file lacks wins; the file's other fields still apply.
    #[test]
    fn test_flag_fills_field_missing_from_file() -> Result<()> {
        let loaded = PersistedConfig {
            port: Some(8181),
            ..PersistedConfig::default()
        };
        let cli = ServeArgs {
            ips: Some(vec!["10.1.1.1".into()]),
            ..ServeArgs::default()
        };

        let resolved = resolve(&cli, &loaded)?;

        assert_eq!(resolved.allowed_ips, set(&["10.1.1.1"]));
        assert_eq!(resolved.port, 8181);
        Ok(())
    }

    #[test]
    fn test_empty_strings_fall_through() -> Result<()> {
        let cli = ServeArgs {
            path: Some(String::new()),
            listen: Some(String::new()),
            ..ServeArgs::default()
        };
        let loaded = PersistedConfig {
            html_path: Some(String::new()),
            listen: Some("127.0.0.1".into()),
            ..PersistedConfig::default()
        };

        let resolved = resolve(&cli, &loaded)?;

        assert_eq!(resolved.html_path, None);
        assert_eq!(resolved.listen.to_string(), "127.0.0.1");
        Ok(())
    }

    /// An explicitly empty list in the file is kept (and disables filtering).
    #[test]
    fn test_empty_allow_list_from_file_is_kept() -> Result<()> {
        let loaded = PersistedConfig {
            allowed_ips: Some(Vec::new()),
            ..PersistedConfig::default()
        };
        let resolved = resolve(&ServeArgs::default(), &loaded)?;
        assert!(resolved.allowed_ips.is_empty());
        Ok(())
    }

    #[test]
    fn test_relative_paths_use_default_directory() -> Result<()> {
        let cli = ServeArgs {
            path: Some("index.html".into()),
            directory: Some("/var/www".into()),
            ..ServeArgs::default()
        };

        let resolved = resolve(&cli, &PersistedConfig::default())?;

        assert_eq!(resolved.html_path, Some(PathBuf::from("/var/www/index.html")));
        assert_eq!(resolved.static_directory, PathBuf::from("/var/www/static"));
        Ok(())
    }

    #[test]
    fn test_tilde_is_expanded() -> Result<()> {
        let Some(home) = dirs::home_dir() else {
            return Ok(());
        };
        let cli = ServeArgs {
            path: Some("~/page.html".into()),
            ..ServeArgs::default()
        };

        let resolved = resolve(&cli, &PersistedConfig::default())?;

        assert_eq!(resolved.html_path, Some(home.join("page.html")));
        Ok(())
    }

    #[test]
    fn test_invalid_listen_address() {
        let cli = ServeArgs {
            listen: Some("not-an-ip".into()),
            ..ServeArgs::default()
        };
        let err = resolve(&cli, &PersistedConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RwebError>(),
            Some(RwebError::Config(msg)) if msg.contains("not-an-ip")
        ));
    }

    #[test]
    fn test_port_zero_from_file_rejected() {
        let loaded = PersistedConfig {
            port: Some(0),
            ..PersistedConfig::default()
        };
        let err = resolve(&ServeArgs::default(), &loaded).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RwebError>(),
            Some(RwebError::Config(_))
        ));
    }

    /// `merge` keeps paths as typed; only `finalize` anchors them.
    #[test]
    fn test_merge_keeps_raw_paths() {
        let cli = ServeArgs {
            path: Some("page.html".into()),
            ..ServeArgs::default()
        };

        let merged = merge(&cli, &PersistedConfig::default());

        assert_eq!(merged.html_path.as_deref(), Some("page.html"));
        assert_eq!(merged.static_directory.as_deref(), Some("static"));
        assert_eq!(merged.default_directory.as_deref(), Some("."));
        assert_eq!(merged.port, Some(5000));
        assert_eq!(merged.allowed_ips, Some(vec!["127.0.0.1".to_string()]));
    }

    #[test]
    fn test_report_source_with_existing_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "port: 8081\n")?;
        let resolved = resolve(&ServeArgs::default(), &PersistedConfig::default())?;
        let mut out = Vec::new();

        report_source(&path, &resolved, &mut out)?;

        let text = String::from_utf8(out)?;
        assert_eq!(text, format!("Loaded configuration from: {}\n", path.display()));
        Ok(())
    }

    #[test]
    fn test_report_source_lists_fallbacks() -> Result<()> {
        let temp = TempDir::new()?;
        let resolved = resolve(&ServeArgs::default(), &PersistedConfig::default())?;
        let mut out = Vec::new();

        report_source(&temp.path().join("missing.yaml"), &resolved, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.starts_with("No configuration file loaded. Using fallback values:"));
        assert!(text.contains("Allowed IPs: [\"127.0.0.1\"]"));
        assert!(text.contains("Port: 5000"));
        assert!(text.contains("Listen: 0.0.0.0"));
        assert!(text.contains("Default Message: Hello World!"));
        Ok(())
    }
}
