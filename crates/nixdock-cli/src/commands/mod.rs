//! CLI command definitions and dispatch.

pub mod build;
pub mod check;
pub mod smoke;

use clap::{Parser, Subcommand};

/// nixdock — build and smoke-test Nix-built Docker images.
#[derive(Parser, Debug)]
#[command(name = "nixdock", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an unzipped image into the current directory.
    Build(build::BuildArgs),
    /// Validate the structure of an unzipped image directory.
    Check(check::CheckArgs),
    /// Build, load, and run a tarball image end to end.
    Smoke(smoke::SmokeArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => build::execute(&args),
        Command::Check(args) => check::execute(&args),
        Command::Smoke(args) => smoke::execute(&args),
    }
}
