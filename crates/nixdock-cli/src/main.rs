//! # nixdock — image pipeline CLI
//!
//! Builds Nix-defined Docker images, validates their structure, and
//! smoke-tests them in a local container engine.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
