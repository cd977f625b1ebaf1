//! Shared constants for artifact layout and tool names.

/// Manifest file at the root of an unzipped image directory or tarball.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Layer content tarball inside each layer directory.
pub const LAYER_TARBALL: &str = "layer.tar";

/// Legacy per-layer metadata file (docker save v1 layout).
pub const LAYER_METADATA: &str = "json";

/// Per-layer schema version marker.
pub const LAYER_VERSION: &str = "VERSION";

/// Subdirectory of the build out-link holding the unzipped image tree.
pub const IMAGE_SUBDIR: &str = "image";

/// Default nix-build out-link name for unzipped image builds.
pub const DEFAULT_OUT_LINK: &str = "output";

/// Default nix-build out-link name for tarball builds.
pub const TARBALL_OUT_LINK: &str = "image-tarred";

/// Build tool binary invoked for expression evaluation.
pub const NIX_BUILD_BIN: &str = "nix-build";

/// Container engine binary used for load/run/rmi.
pub const DOCKER_BIN: &str = "docker";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Application name used in CLI output.
pub const APP_NAME: &str = "nixdock";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "nixdock";
