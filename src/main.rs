//! Brcmfw CLI - Broadcom PatchRAM firmware packager
//!
//! Entry point for the brcmfw command-line application.

use anyhow::Result;
use clap::Parser;

use brcmfw::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; progress output is the product of this
    // tool, so the default level is info rather than warn.
    let default_level = if cli.quiet {
        tracing::Level::ERROR
    } else if cli.verbose > 0 {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    // Run the packaging pipeline and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("✗ {e:#}");
            std::process::exit(1);
        }
    }
}
