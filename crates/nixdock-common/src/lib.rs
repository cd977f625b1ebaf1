//! # nixdock-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the nixdock workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the harness
//! and CLI build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
