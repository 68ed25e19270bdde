//! Output Checksums
//!
//! Generated record files are compared and logged by the SHA-256 of their
//! exact text, so a single changed byte (including line endings) shows up.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 of a generated file's text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    pub fn of(content: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(content.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `content` hashes to this checksum
    pub fn verify(&self, content: &str) -> bool {
        Self::of(content) == *self
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_output_same_checksum() {
        let content = "Foo = Data.define\n";
        assert_eq!(Checksum::of(content), Checksum::of(content));
    }

    #[test]
    fn test_renamed_record_changes_checksum() {
        assert_ne!(Checksum::of("Foo = Data.define\n"), Checksum::of("Bar = Data.define\n"));
    }

    #[test]
    fn test_trailing_blank_line_fails_verification() {
        let checksum = Checksum::of("A = Data.define(:a)\n");
        assert!(checksum.verify("A = Data.define(:a)\n"));
        assert!(!checksum.verify("A = Data.define(:a)\n\n"));
    }

    #[test]
    fn test_empty_output_digest() {
        let checksum = Checksum::of("");
        assert_eq!(
            checksum.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(checksum.to_string(), checksum.as_str());
    }
}
