//! # RWeb Config Commands
//!
//! File: cli/src/commands/config/mod.rs
//!
//! ## Overview
//!
//! The two non-serving modes:
//! - `--list-config`: print the config file that would be used, then exit.
//! - `--generate-config`: write the merged settings to a config file, asking
//!   before an existing file is replaced, then exit. No preflight runs.
//!
//! Both exit 0 on the normal paths, including a declined overwrite.
//!
//! ```bash
//! # Save the current flags for next time
//! rweb --port 8080 --ips 127.0.0.1 10.0.0.4 --generate-config
//!
//! # Inspect what was saved
//! rweb --list-config
//! ```
//!
use crate::commands::serve::options::{self, ServeArgs};
use crate::common::system;
use crate::common::ui::prompts::{Confirm, StdinConfirm};
use crate::core::config::{self, ConfigLocations, SaveOutcome};
use crate::core::error::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// # Handle List Config (`handle_list`)
pub fn handle_list(args: &ServeArgs) -> Result<()> {
    let locations = ConfigLocations::from_env()?;
    let path = config::resolve_path(args.config.as_deref(), system::is_privileged(), &locations);
    info!("Listing config file {}", path.display());
    config::list_current(&path, &mut std::io::stdout())
}

/// # Handle Generate Config (`handle_generate`)
pub fn handle_generate(args: &ServeArgs) -> Result<()> {
    let locations = ConfigLocations::from_env()?;
    generate(
        args,
        system::is_privileged(),
        &locations,
        &mut StdinConfirm,
        &mut std::io::stdout(),
    )
    .map(|_| ())
}

/// Writes the merged configuration to `--config` if given, else to the
/// working-directory location. The existing config (wherever it resolves)
/// still contributes values the flags do not override.
fn generate(
    args: &ServeArgs,
    privileged: bool,
    locations: &ConfigLocations,
    confirm: &mut dyn Confirm,
    out: &mut impl Write,
) -> Result<(PathBuf, SaveOutcome)> {
    let source = config::resolve_path(args.config.as_deref(), privileged, locations);
    let loaded = config::load(&source)?;

    let merged = options::merge(args, &loaded);
    // Reject values the server would refuse to start with.
    options::finalize(&merged)?;

    let target = args.config.clone().unwrap_or_else(|| locations.local.clone());
    let outcome = config::save(&target, &merged, confirm)?;
    match outcome {
        SaveOutcome::Written => writeln!(
            out,
            "Config file '{}' generated successfully.",
            target.display()
        )?,
        SaveOutcome::Cancelled => writeln!(
            out,
            "Operation cancelled. The config file was not overwritten."
        )?,
    }
    Ok((target, outcome))
}
