//! Content fingerprints for rendered artifacts
//!
//! Same diagram source and render configuration = same key.

use crate::error::{TexsyncError, TexsyncResult};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA256 over the render inputs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a diagram source together with its render configuration
    pub fn of(source: &str, render_config: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        // Length prefix keeps ("ab", "c") and ("a", "bc") apart
        hasher.update((source.len() as u64).to_le_bytes());
        hasher.update(source.as_bytes());
        hasher.update(render_config);
        Self(hex::encode(hasher.finalize()))
    }

    /// Parse a stored key: exactly 64 lowercase hex characters
    pub fn parse(key: &str) -> TexsyncResult<Self> {
        let valid = key.len() == 64
            && key
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !valid {
            return Err(TexsyncError::CacheKeyInvalid(key.to_string()));
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
