//! Configuration model for harness runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings controlling where builds run and what survives a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Directory to run builds in. `None` means a fresh temporary directory
    /// owned by the run and removed afterwards.
    pub work_dir: Option<PathBuf>,
    /// Name of the nix-build out-link created in the work directory.
    pub out_link: String,
    /// Keep loaded images in the engine instead of removing them on exit.
    pub keep_images: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            out_link: crate::constants::DEFAULT_OUT_LINK.to_owned(),
            keep_images: false,
        }
    }
}
