//! `nix-build` invocation.
//!
//! The builder is an opaque collaborator: we hand it an inline expression
//! and an out-link name, and any non-zero exit is a hard failure carried up
//! to the caller unchanged. No retries, no partial-success handling.

use std::path::{Path, PathBuf};
use std::process::Command;

use nixdock_common::constants::NIX_BUILD_BIN;
use nixdock_common::error::{NixdockError, Result};

/// Evaluates a build expression with `nix-build -E`, creating the named
/// out-link in `work_dir`.
///
/// Returns the out-link path on success.
///
/// # Errors
///
/// Returns `NixdockError::NotFound` if `nix-build` is not on `PATH`, and
/// `NixdockError::CommandFailed` carrying the exit status and stderr if the
/// build exits non-zero.
pub fn nix_build(expr: &str, work_dir: &Path, out_link: &str) -> Result<PathBuf> {
    let binary = which::which(NIX_BUILD_BIN).map_err(|_| NixdockError::NotFound {
        kind: "binary",
        id: NIX_BUILD_BIN.to_owned(),
    })?;

    tracing::info!(
        work_dir = %work_dir.display(),
        out_link,
        "evaluating build expression"
    );

    let output = Command::new(&binary)
        .args(["-E", expr, "-o", out_link])
        .current_dir(work_dir)
        .output()
        .map_err(|e| NixdockError::Io {
            path: binary.clone(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(NixdockError::CommandFailed {
            program: NIX_BUILD_BIN.to_owned(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    let link = work_dir.join(out_link);
    tracing::info!(link = %link.display(), "build produced out-link");
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_builder_or_bad_expression_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        // With nix-build absent this is NotFound; with it present the
        // expression is a parse error, so the build exits non-zero.
        let result = nix_build("syntactically ( broken", dir.path(), "out");
        assert!(matches!(
            result,
            Err(NixdockError::NotFound { .. } | NixdockError::CommandFailed { .. })
        ));
    }
}
