//! Structural validation of image artifacts.
//!
//! An unzipped image is a directory holding one subdirectory per layer plus
//! a `manifest.json` in the docker-save layout: an array of entries naming
//! the config file, repo tags, and layer tarball paths. Each layer directory
//! carries `layer.tar`, `json`, and `VERSION`. A zipped image is the same
//! tree packed into a single tar archive.

use std::path::{Path, PathBuf};

use nixdock_common::constants::{LAYER_METADATA, LAYER_TARBALL, LAYER_VERSION, MANIFEST_FILE};
use nixdock_common::error::{NixdockError, Result};
use nixdock_common::types::Sha256Hash;
use serde::Deserialize;

/// One entry of a docker-save `manifest.json`.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(rename = "Config")]
    config: Option<String>,
    #[serde(rename = "RepoTags", default)]
    repo_tags: Vec<String>,
    #[serde(rename = "Layers")]
    layers: Vec<String>,
}

/// Validation result for a single layer directory.
#[derive(Debug, Clone)]
pub struct LayerReport {
    /// Directory name of the layer.
    pub id: String,
    /// SHA-256 digest of the layer tarball.
    pub digest: Sha256Hash,
    /// Size of the layer tarball in bytes.
    pub size_bytes: u64,
}

/// Validation result for a whole unzipped image directory.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Repo tags declared by the manifest.
    pub repo_tags: Vec<String>,
    /// One report per layer directory, in directory-name order.
    pub layers: Vec<LayerReport>,
}

impl ImageReport {
    /// Number of layer directories found in the image.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Validates the structure of an unzipped image directory.
///
/// Checks that `manifest.json` is present and parses, that every layer path
/// it references exists, and that each layer directory is well-formed with a
/// readable `layer.tar`. Returns a report with per-layer digests and sizes.
///
/// # Errors
///
/// Returns `NixdockError::Malformed` on any structural violation, and I/O or
/// serialization errors if the artifact cannot be read.
pub fn validate_image(image_dir: &Path) -> Result<ImageReport> {
    tracing::info!(image = %image_dir.display(), "validating image directory");

    let manifest_path = image_dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(malformed(image_dir, format!("missing {MANIFEST_FILE}")));
    }
    let content = std::fs::read_to_string(&manifest_path).map_err(|e| NixdockError::Io {
        path: manifest_path.clone(),
        source: e,
    })?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&content)?;
    if entries.is_empty() {
        return Err(malformed(image_dir, format!("{MANIFEST_FILE} lists no images")));
    }

    let mut repo_tags = Vec::new();
    for entry in &entries {
        repo_tags.extend(entry.repo_tags.iter().cloned());
        if let Some(config) = &entry.config {
            if !image_dir.join(config).is_file() {
                return Err(malformed(image_dir, format!("missing config file {config}")));
            }
        }
        for layer in &entry.layers {
            if !image_dir.join(layer).is_file() {
                return Err(malformed(image_dir, format!("missing layer tarball {layer}")));
            }
        }
    }

    let mut layers = Vec::new();
    for id in layer_dir_names(image_dir)? {
        layers.push(validate_layer_dir(image_dir, &id)?);
    }
    if layers.is_empty() {
        return Err(malformed(image_dir, "no layer directories".to_owned()));
    }

    tracing::info!(layers = layers.len(), "image directory is well-formed");
    Ok(ImageReport { repo_tags, layers })
}

/// Validates that a zipped image artifact is a readable tar archive
/// containing a `manifest.json` entry.
///
/// Accepts plain `.tar` as well as gzip-compressed archives.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, is not a valid tar
/// stream, or carries no manifest.
pub fn validate_tarball(path: &Path) -> Result<()> {
    tracing::info!(tarball = %path.display(), "validating image tarball");

    let file = std::fs::File::open(path).map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let found = if is_gzip_archive(path) {
        let decoder = flate2::read::GzDecoder::new(file);
        archive_contains_manifest(tar::Archive::new(decoder), path)?
    } else {
        archive_contains_manifest(tar::Archive::new(file), path)?
    };

    if !found {
        return Err(malformed(path, format!("no {MANIFEST_FILE} entry in archive")));
    }
    Ok(())
}

fn archive_contains_manifest<R: std::io::Read>(
    mut archive: tar::Archive<R>,
    path: &Path,
) -> Result<bool> {
    let entries = archive.entries().map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| NixdockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let entry_path = entry.path().map_err(|e| NixdockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if entry_path
            .file_name()
            .is_some_and(|name| name == MANIFEST_FILE)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns the names of the immediate subdirectories of `image_dir`, sorted.
fn layer_dir_names(image_dir: &Path) -> Result<Vec<String>> {
    let read_dir = std::fs::read_dir(image_dir).map_err(|e| NixdockError::Io {
        path: image_dir.to_path_buf(),
        source: e,
    })?;
    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| NixdockError::Io {
            path: image_dir.to_path_buf(),
            source: e,
        })?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn validate_layer_dir(image_dir: &Path, id: &str) -> Result<LayerReport> {
    let layer_dir = image_dir.join(id);
    for required in [LAYER_TARBALL, LAYER_METADATA, LAYER_VERSION] {
        if !layer_dir.join(required).is_file() {
            return Err(malformed(&layer_dir, format!("missing {required}")));
        }
    }

    let tarball = layer_dir.join(LAYER_TARBALL);
    check_readable_tar(&tarball)?;

    let size_bytes = std::fs::metadata(&tarball)
        .map_err(|e| NixdockError::Io {
            path: tarball.clone(),
            source: e,
        })?
        .len();
    let digest = crate::hash::hash_file(&tarball)?;
    tracing::debug!(layer = id, %digest, size = size_bytes, "layer is well-formed");

    Ok(LayerReport {
        id: id.to_owned(),
        digest,
        size_bytes,
    })
}

/// Walks every entry header of a tar file to confirm it is a valid stream.
fn check_readable_tar(path: &Path) -> Result<()> {
    let file = std::fs::File::open(path).map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive = tar::Archive::new(file);
    let entries = archive.entries().map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        if let Err(e) = entry {
            return Err(malformed(path, format!("unreadable tar entry: {e}")));
        }
    }
    Ok(())
}

/// Determines whether the archive is gzip-compressed based on extension.
fn is_gzip_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("tgz"))
}

fn malformed(path: &Path, message: String) -> NixdockError {
    NixdockError::Malformed {
        path: PathBuf::from(path),
        message,
    }
}
