//! SHA-256 content verification for image layers.

use std::path::Path;

use nixdock_common::error::{NixdockError, Result};
use nixdock_common::types::Sha256Hash;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn hash_file(path: &Path) -> Result<Sha256Hash> {
    tracing::debug!(path = %path.display(), "computing SHA-256 hash");

    let mut file = std::fs::File::open(path).map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut hasher = Sha256::new();
    let _ = std::io::copy(&mut file, &mut hasher).map_err(|e| NixdockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Sha256Hash::from_hex(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_known_content_matches() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("data.txt");
        std::fs::write(&path, b"hello\n").expect("write failed");

        let hash = hash_file(&path).expect("hash failed");
        // sha256sum of "hello\n"
        assert_eq!(
            hash.as_hex(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn hash_of_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        assert!(hash_file(&dir.path().join("absent")).is_err());
    }
}
