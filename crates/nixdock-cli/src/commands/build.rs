//! `nixdock build` — Build an unzipped image into the current directory.

use clap::Args;
use nixdock_common::constants::DEFAULT_OUT_LINK;
use nixdock_common::types::ImageRef;
use nixdock_harness::{build, expr};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Image name (lowercase repository form).
    #[arg(long)]
    pub name: String,

    /// Image tag.
    #[arg(long, default_value = "latest")]
    pub tag: String,

    /// Name of the out-link to create.
    #[arg(long, default_value = DEFAULT_OUT_LINK)]
    pub out_link: String,
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if the reference is invalid or the build fails.
pub fn execute(args: &BuildArgs) -> anyhow::Result<()> {
    let image = ImageRef::parse(&format!("{}:{}", args.name, args.tag))?;
    let work_dir = std::env::current_dir()?;
    tracing::info!(%image, out_link = %args.out_link, "building unzipped image");

    let link = build::nix_build(&expr::unzipped_image_expr(&image), &work_dir, &args.out_link)?;
    println!("Built {image} -> {}", link.display());
    Ok(())
}
