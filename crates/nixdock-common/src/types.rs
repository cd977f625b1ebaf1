//! Domain primitive types used across the nixdock workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Docker image reference: repository name plus tag.
///
/// Renders as `name:tag`, the form accepted by `docker load`, `docker run`,
/// and `docker rmi`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    name: String,
    tag: String,
}

impl ImageRef {
    /// Creates a reference without syntactic checks.
    ///
    /// The name and tag are embedded verbatim into build expressions; a
    /// malformed reference makes the builder fail rather than this crate.
    /// Use [`ImageRef::parse`] for early rejection.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parses and validates a `name:tag` reference.
    ///
    /// Enforces the Docker reference grammar: the repository name is
    /// lowercase alphanumerics with `.`, `_`, `-`, and `/` separators; the
    /// tag is up to 128 word characters, `.` or `-`, not starting with a
    /// separator.
    ///
    /// # Errors
    ///
    /// Returns `NixdockError::Config` if either part violates the grammar.
    pub fn parse(reference: &str) -> crate::error::Result<Self> {
        let (name, tag) = reference.split_once(':').ok_or_else(|| {
            crate::error::NixdockError::Config {
                message: format!("image reference missing tag: {reference}"),
            }
        })?;
        if !is_valid_name(name) {
            return Err(crate::error::NixdockError::Config {
                message: format!("invalid image name: {name}"),
            });
        }
        if !is_valid_tag(tag) {
            return Err(crate::error::NixdockError::Config {
                message: format!("invalid image tag: {tag}"),
            });
        }
        Ok(Self::new(name, tag))
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

fn is_valid_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('/').all(|component| {
        !component.is_empty()
            && component.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
            && component
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._-".contains(c))
    })
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.len() <= 128
        && tag.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._-".contains(c))
}

/// SHA-256 hash digest used for content verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Creates a hash from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid 64-character hex string.
    pub fn from_hex(hex: impl Into<String>) -> crate::error::Result<Self> {
        let hex = hex.into();
        if hex.len() != crate::constants::SHA256_HEX_LENGTH
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(crate::error::NixdockError::Config {
                message: format!("invalid SHA-256 hex string: {hex}"),
            });
        }
        Ok(Self(hex))
    }

    /// Returns the hex-encoded hash string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn image_ref_displays_as_name_colon_tag() {
        let image = ImageRef::new("bash_image", "bash_tag");
        assert_eq!(image.to_string(), "bash_image:bash_tag");
    }

    #[test]
    fn parse_accepts_well_formed_references() {
        let image = ImageRef::parse("library/some-image_1:v1.2-rc_3").unwrap();
        assert_eq!(image.name(), "library/some-image_1");
        assert_eq!(image.tag(), "v1.2-rc_3");
    }

    #[test]
    fn parse_rejects_missing_tag() {
        assert!(ImageRef::parse("just-a-name").is_err());
    }

    #[test]
    fn parse_rejects_invalid_name_characters() {
        assert!(ImageRef::parse("Has Spaces:tag").is_err());
        assert!(ImageRef::parse("UPPER:tag").is_err());
        assert!(ImageRef::parse("quo\"te:tag").is_err());
        assert!(ImageRef::parse(":tag").is_err());
    }

    #[test]
    fn parse_rejects_invalid_tags() {
        assert!(ImageRef::parse("name:").is_err());
        assert!(ImageRef::parse("name:-leading-dash").is_err());
        assert!(ImageRef::parse(&format!("name:{}", "t".repeat(129))).is_err());
    }

    #[test]
    fn sha256_hash_round_trips_hex() {
        let hex = "a".repeat(64);
        let hash = Sha256Hash::from_hex(&hex).unwrap();
        assert_eq!(hash.as_hex(), hex);
        assert_eq!(hash.to_string(), format!("sha256:{hex}"));
    }

    #[test]
    fn sha256_hash_rejects_bad_input() {
        assert!(Sha256Hash::from_hex("short").is_err());
        assert!(Sha256Hash::from_hex("g".repeat(64)).is_err());
    }
}
