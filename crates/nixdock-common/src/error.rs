//! Unified error types for the nixdock workspace.
//!
//! Every fallible operation in the harness funnels into [`NixdockError`];
//! the CLI wraps it in `anyhow` at the binary edge.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NixdockError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value or argument is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource or binary was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An external command exited with a non-zero status.
    #[error("{program} failed with {status}: {stderr}")]
    CommandFailed {
        /// The invoked program.
        program: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// An image artifact does not have the expected structure.
    #[error("malformed image artifact at {path}: {message}")]
    Malformed {
        /// Artifact path that failed validation.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, NixdockError>;
