//! Docker engine interaction: load, run, remove.
//!
//! The engine is driven entirely through its CLI. Loaded images are handed
//! back as [`LoadedImage`] guards so the image store is left clean on every
//! exit path, including panics in the middle of an assertion.

use std::path::{Path, PathBuf};
use std::process::Command;

use nixdock_common::constants::DOCKER_BIN;
use nixdock_common::error::{NixdockError, Result};
use nixdock_common::types::ImageRef;

/// Handle to a locally available `docker` binary.
#[derive(Debug)]
pub struct DockerEngine {
    binary: PathBuf,
}

impl DockerEngine {
    /// Locates the `docker` binary on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `NixdockError::NotFound` if no binary is found.
    pub fn new() -> Result<Self> {
        let binary = which::which(DOCKER_BIN).map_err(|_| NixdockError::NotFound {
            kind: "binary",
            id: DOCKER_BIN.to_owned(),
        })?;
        Ok(Self { binary })
    }

    /// Loads a tarball image into the engine's local store.
    ///
    /// The returned guard removes the image again when dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the tarball does not exist or `docker load`
    /// exits non-zero.
    pub fn load<'a>(&'a self, image: &ImageRef, tarball: &Path) -> Result<LoadedImage<'a>> {
        if !tarball.exists() {
            return Err(NixdockError::NotFound {
                kind: "tarball",
                id: tarball.display().to_string(),
            });
        }

        tracing::info!(%image, tarball = %tarball.display(), "loading image");
        let _ = self.run_checked(&["load", "-i", &tarball.display().to_string()])?;

        Ok(LoadedImage {
            engine: self,
            image: image.clone(),
            keep: false,
        })
    }

    /// Runs a one-shot container from the image and captures its stdout.
    ///
    /// Invokes `docker run -i --rm <image> <command...>`, so the container
    /// is removed by the engine as soon as it exits.
    ///
    /// # Errors
    ///
    /// Returns `NixdockError::Config` for an empty command and
    /// `NixdockError::CommandFailed` if the container exits non-zero.
    pub fn run_capture(&self, image: &ImageRef, command: &[&str]) -> Result<String> {
        if command.is_empty() {
            return Err(NixdockError::Config {
                message: "container command is empty".into(),
            });
        }

        tracing::info!(%image, cmd = ?command, "running container");
        let reference = image.to_string();
        let mut args = vec!["run", "-i", "--rm", &reference];
        args.extend_from_slice(command);
        self.run_checked(&args)
    }

    /// Removes an image from the engine's local store.
    ///
    /// # Errors
    ///
    /// Returns `NixdockError::CommandFailed` if `docker rmi` exits non-zero.
    pub fn remove_image(&self, image: &ImageRef) -> Result<()> {
        tracing::info!(%image, "removing image");
        let _ = self.run_checked(&["rmi", &image.to_string()])?;
        Ok(())
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| NixdockError::Io {
                path: self.binary.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(NixdockError::CommandFailed {
                program: DOCKER_BIN.to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Scoped handle to an image loaded into the engine.
///
/// Dropping the guard unloads the image. Removal failure is logged, never
/// propagated, since drop runs on unwind paths too.
#[derive(Debug)]
pub struct LoadedImage<'a> {
    engine: &'a DockerEngine,
    image: ImageRef,
    keep: bool,
}

impl LoadedImage<'_> {
    /// The reference the image was loaded under.
    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Leaves the image in the engine's store instead of removing it.
    pub fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for LoadedImage<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = self.engine.remove_image(&self.image) {
            tracing::warn!(image = %self.image, error = %e, "failed to unload image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_fake_binary() -> DockerEngine {
        DockerEngine {
            binary: PathBuf::from("docker"),
        }
    }

    #[test]
    fn run_capture_rejects_empty_command() {
        let engine = engine_with_fake_binary();
        let image = ImageRef::new("bash_image", "bash_tag");
        let result = engine.run_capture(&image, &[]);
        assert!(matches!(result, Err(NixdockError::Config { .. })));
    }

    #[test]
    fn load_rejects_missing_tarball() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let engine = engine_with_fake_binary();
        let image = ImageRef::new("bash_image", "bash_tag");
        let result = engine.load(&image, &dir.path().join("absent.tar"));
        assert!(matches!(result, Err(NixdockError::NotFound { .. })));
    }
}
