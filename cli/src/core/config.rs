//! # RWeb Configuration Store
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module reads and writes the persisted configuration record,
//! `config.yaml`, and decides which of the well-known locations to use.
//!
//! ## Architecture
//!
//! - `PersistedConfig`: the on-disk record. Every field is optional so a user
//!   can write only the settings they care about; missing fields fall through
//!   to command-line values or fallbacks during option resolution.
//! - `ConfigLocations`: the candidate paths (system-wide, per-user, working
//!   directory). Computed from the environment once, then handed to
//!   `resolve_path`, which only inspects the filesystem and never modifies it.
//! - `load` / `save` / `list_current`: the store operations.
//!
//! Location rules (first match wins):
//! 1. An explicit `--config <file>` is used as given.
//! 2. Privileged: `/etc/rweb/config.yaml` if present, else `~/.rweb/config.yaml`.
//! 3. Unprivileged: `./.rweb/config.yaml` if present, else `~/.rweb/config.yaml`
//!    if present, else `./.rweb/config.yaml`.
//!
//! ## Examples
//!
//! ```yaml
//! allowed_ips:
//!   - 127.0.0.1
//!   - 192.168.1.20
//! html_path: /srv/www/status.html
//! port: 8080
//! listen: 0.0.0.0
//! default_message: Hello World!
//! default_directory: /srv/www
//! static_directory: static
//! ```
//!
use crate::common::fs::io;
use crate::common::ui::prompts::Confirm;
use crate::core::error::{Result, RwebError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory holding the config file, below home or the working directory.
pub const CONFIG_DIR_NAME: &str = ".rweb";
/// Name of the config file inside `CONFIG_DIR_NAME`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// System-wide location consulted when running privileged.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/rweb/config.yaml";

/// The persisted configuration record. Key names are part of the file format.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_directory: Option<String>,
}

/// Candidate config file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocations {
    pub system: PathBuf,
    /// `None` when no home directory can be determined.
    pub user: Option<PathBuf>,
    pub local: PathBuf,
}

impl ConfigLocations {
    /// Builds the standard locations from the current environment.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| RwebError::FileSystem(format!("Failed to get current directory: {}", e)))?;
        let user = dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        Ok(Self {
            system: PathBuf::from(SYSTEM_CONFIG_PATH),
            user,
            local: cwd.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        })
    }
}

/// Result of `save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// The file existed and the overwrite was declined; nothing was written.
    Cancelled,
}

/// # Resolve Config Path (`resolve_path`)
///
/// Picks the config file to use. See the module docs for the rules. Only
/// checks for existence; nothing is created.
pub fn resolve_path(
    explicit: Option<&Path>,
    is_privileged: bool,
    locations: &ConfigLocations,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let user_existing = locations.user.as_ref().filter(|p| p.is_file());

    let resolved = if is_privileged {
        if locations.system.is_file() {
            locations.system.clone()
        } else {
            // No home directory: keep pointing at the system location.
            locations.user.clone().unwrap_or_else(|| locations.system.clone())
        }
    } else if locations.local.is_file() {
        locations.local.clone()
    } else if let Some(user) = user_existing {
        user.clone()
    } else {
        locations.local.clone()
    };

    debug!("Resolved config path to {}", resolved.display());
    resolved
}

/// # Load Config (`load`)
///
/// Reads and parses the record at `path`. A missing file yields an empty
/// record; so does a file containing only whitespace.
///
/// ## Errors
///
/// `RwebError::ConfigParse` when the file exists but is not a valid record;
/// an I/O error when it cannot be read.
pub fn load(path: &Path) -> Result<PersistedConfig> {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(PersistedConfig::default());
    }

    let content = io::read_file_to_string(path)?;
    let record = parse(path, &content)?;
    info!("Loaded config file {}", path.display());
    Ok(record)
}

fn parse(path: &Path, content: &str) -> Result<PersistedConfig> {
    if content.trim().is_empty() {
        return Ok(PersistedConfig::default());
    }
    serde_yaml::from_str::<Option<PersistedConfig>>(content)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            RwebError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
}

/// # Save Config (`save`)
///
/// Serialises `record` to `path`, creating parent directories. If the file
/// already exists, `confirm` must agree before it is replaced.
pub fn save(path: &Path, record: &PersistedConfig, confirm: &mut dyn Confirm) -> Result<SaveOutcome> {
    if path.exists() {
        let question = format!(
            "The file '{}' already exists. Do you want to overwrite it?",
            path.display()
        );
        if !confirm.confirm(&question)? {
            info!("Overwrite of {} declined", path.display());
            return Ok(SaveOutcome::Cancelled);
        }
    }

    let yaml = serde_yaml::to_string(record)
        .map_err(|e| RwebError::Config(format!("Failed to serialise configuration: {}", e)))?;
    io::write_string_to_file(path, &yaml)?;
    Ok(SaveOutcome::Written)
}

/// # List Current Config (`list_current`)
///
/// Writes the record stored at `path` to `out`, or a notice that there is none.
/// A malformed file is reported as an error rather than printed.
pub fn list_current(path: &Path, out: &mut impl Write) -> Result<()> {
    if !path.exists() {
        writeln!(out, "No config file found at {}", path.display())?;
        return Ok(());
    }

    let record = parse(path, &io::read_file_to_string(path)?)?;
    let yaml = serde_yaml::to_string(&record)
        .map_err(|e| RwebError::Config(format!("Failed to serialise configuration: {}", e)))?;
    writeln!(out, "Current configuration:")?;
    writeln!(out, "{}", yaml)?;
    Ok(())
}
