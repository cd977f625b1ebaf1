//! # nixdock-harness
//!
//! Drives the full image pipeline against external tooling:
//!
//! - **Expressions**: render Nix build expressions for Docker images.
//! - **Build**: invoke `nix-build` and surface hard failures.
//! - **Validation**: structural checks on unzipped image trees and tarballs.
//! - **Hashing**: SHA-256 layer digests.
//! - **Docker**: load tarballs into the engine under an unload-on-drop
//!   guard, run containers, capture output.
//!
//! Every step is a blocking subprocess call; the pipeline is strictly
//! sequential and each failure is fatal to the run that hit it.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod build;
pub mod docker;
pub mod expr;
pub mod hash;
pub mod validate;
