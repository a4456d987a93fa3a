//! # RWeb Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `rweb` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Choosing the mode: list config, generate config, or serve
//!
//! ## Examples
//!
//! ```bash
//! # Serve ./index.html on port 8080 to two addresses
//! rweb -P 8080 -p index.html -i 127.0.0.1 192.168.1.20
//!
//! # Show the config file in use
//! rweb --list-config
//!
//! # More logging
//! rweb -vv
//! ```
//!
//! Any error ends the process with status 1 after printing `Error: ...`.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // serve and config modes
mod common; // shared utilities (fs, network, system, ui)
mod core; // config store and errors

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "rweb",
    about = "Serve a single HTML page to an allow-list of IP addresses",
    version,
    max_term_width = 100
)]
struct Cli {
    #[command(flatten)]
    options: commands::serve::ServeArgs,

    /// Generate a config.yaml file with the current settings.
    #[arg(short = 'G', long)]
    generate_config: bool,

    /// List the current config.yaml file content and exit.
    #[arg(short = 'l', long, conflicts_with = "generate_config")]
    list_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = if cli.list_config {
        commands::config::handle_list(&cli.options)
    } else if cli.generate_config {
        commands::config::handle_generate(&cli.options)
    } else {
        commands::serve::handle_serve(cli.options).await
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
