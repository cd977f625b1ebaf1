//! `nixdock check` — Validate the structure of an unzipped image directory.

use clap::Args;
use nixdock_harness::validate;

use crate::output::format_bytes;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the image directory (the tree containing manifest.json).
    pub path: std::path::PathBuf,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the image directory is malformed or unreadable.
pub fn execute(args: &CheckArgs) -> anyhow::Result<()> {
    tracing::info!(path = %args.path.display(), "checking image directory");
    let report = validate::validate_image(&args.path)?;

    println!("Image: {}", args.path.display());
    println!("Tags:  {}", report.repo_tags.join(", "));
    for layer in &report.layers {
        println!(
            "  layer {}  {}  {}",
            layer.id,
            layer.digest,
            format_bytes(layer.size_bytes)
        );
    }
    println!("{} layer(s), all well-formed", report.layer_count());
    Ok(())
}
