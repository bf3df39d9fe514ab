//! Package name validation and tokenization

use crate::error::{TexsyncError, TexsyncResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated package identifier: one or more lowercase ASCII letters or digits
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Parse a single token, rejecting anything outside `[a-z0-9]+`
    pub fn parse(token: &str) -> TexsyncResult<Self> {
        if token.is_empty() || !token.chars().all(is_name_char) {
            return Err(TexsyncError::InvalidCharacters {
                input: token.to_string(),
            });
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageName {
    type Error = TexsyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Validate raw user input and split it into package names.
///
/// The whole input is rejected if any character other than `[a-z0-9]` or
/// whitespace is present; there is no partial result. Empty tokens are
/// dropped, order and duplicates are preserved.
pub fn validate_input(raw: &str) -> TexsyncResult<Vec<PackageName>> {
    if raw.chars().any(|c| !is_name_char(c) && !c.is_whitespace()) {
        return Err(TexsyncError::InvalidCharacters {
            input: raw.to_string(),
        });
    }

    Ok(raw
        .split_whitespace()
        .map(|token| PackageName(token.to_string()))
        .collect())
}

/// Join names back into the space-separated form shown to the user
pub fn join_names(names: &[PackageName]) -> String {
    names
        .iter()
        .map(PackageName::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
