//! `nixdock smoke` — Build, load, and run a tarball image end to end.
//!
//! The pipeline renders the tarball expression, builds it, loads the result
//! into the engine, runs `bash -c "cat /data/hello.txt"`, and compares
//! stdout against the content the setup action wrote at image build time.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use nixdock_common::config::HarnessConfig;
use nixdock_common::constants::TARBALL_OUT_LINK;
use nixdock_common::types::ImageRef;
use nixdock_harness::{build, docker, expr, validate};

/// Output expected from the smoke container.
const EXPECTED_OUTPUT: &str = "hello\n";

/// Arguments for the `smoke` command.
#[derive(Args, Debug)]
pub struct SmokeArgs {
    /// Image name (lowercase repository form).
    #[arg(long, default_value = "bash_image")]
    pub name: String,

    /// Image tag.
    #[arg(long, default_value = "bash_tag")]
    pub tag: String,

    /// Run the build in this directory instead of a throwaway temp dir,
    /// leaving the tarball and out-link behind.
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Keep the loaded image in the engine after the run.
    #[arg(long)]
    pub keep: bool,
}

impl SmokeArgs {
    fn to_config(&self) -> HarnessConfig {
        HarnessConfig {
            work_dir: self.work_dir.clone(),
            out_link: TARBALL_OUT_LINK.to_owned(),
            keep_images: self.keep,
        }
    }
}

/// Executes the `smoke` command.
///
/// # Errors
///
/// Returns an error if any pipeline stage fails or the container output
/// does not match.
pub fn execute(args: &SmokeArgs) -> anyhow::Result<()> {
    let image = ImageRef::parse(&format!("{}:{}", args.name, args.tag))?;
    let config = args.to_config();
    tracing::info!(%image, "starting smoke pipeline");

    let scratch;
    let work_dir: &Path = if let Some(dir) = &config.work_dir {
        dir.as_path()
    } else {
        scratch = tempfile::tempdir().context("failed to create work directory")?;
        scratch.path()
    };

    let tarball = build::nix_build(&expr::tar_image_expr(&image), work_dir, &config.out_link)?;
    validate::validate_tarball(&tarball)?;

    let engine = docker::DockerEngine::new()?;
    let loaded = engine.load(&image, &tarball)?;
    if config.keep_images {
        // Disarm the guard up front so the image survives a failed run too.
        loaded.keep();
    }

    let output = engine.run_capture(&image, &["bash", "-c", "cat /data/hello.txt"])?;
    if output != EXPECTED_OUTPUT {
        anyhow::bail!("unexpected container output: {output:?}, wanted {EXPECTED_OUTPUT:?}");
    }

    println!("Smoke test passed for {image}");
    Ok(())
}
