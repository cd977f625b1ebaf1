//! Nix build expression rendering.
//!
//! The templates are fixed; only the image name and tag are substituted.
//! Callers that accept untrusted references should go through
//! [`ImageRef::parse`] first, since substitution itself performs no
//! escaping.

use nixdock_common::types::ImageRef;

/// Template for a single-content-layer unzipped image. The content layer
/// carries a shell and core utilities, and the setup action writes
/// `/data/hello.txt` at image build time.
const UNZIPPED_TEMPLATE: &str = r#"with import <nixpkgs> {}; with dockerTools; buildImageUnzipped { name = "%NAME%"; tag = "%TAG%"; contents = [pkgs.bashInteractive pkgs.coreutils]; runAsRoot = "mkdir -p /data; echo hello > /data/hello.txt"; }"#;

/// Renders the expression for an unzipped (expanded directory tree) image.
///
/// The result is a single line with no surrounding whitespace, suitable for
/// passing inline to `nix-build -E`.
#[must_use]
pub fn unzipped_image_expr(image: &ImageRef) -> String {
    UNZIPPED_TEMPLATE
        .replace("%NAME%", image.name())
        .replace("%TAG%", image.tag())
}

/// Renders the expression for a tarball image wrapping the unzipped image
/// of the same reference.
#[must_use]
pub fn tar_image_expr(image: &ImageRef) -> String {
    let from_image = unzipped_image_expr(image);
    format!("with import <nixpkgs> {{}}; with dockerTools; tarImage {{ fromImage = {from_image}; }}")
}
