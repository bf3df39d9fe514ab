//! Desired (draft) and installed (confirmed) package sets
//!
//! The two are deliberately different types: a draft can never be handed to
//! code that expects confirmed state. An `InstalledPackageSet` only comes from
//! a fresh installer query or from the last committed settings value.

use crate::error::TexsyncResult;
use crate::package::name::{join_names, validate_input, PackageName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unconfirmed user intent: the toggle plus the names typed in the package field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredPackageSet {
    enabled: bool,
    names: Vec<PackageName>,
}

impl DesiredPackageSet {
    /// Build a draft from the toggle state and raw text input
    pub fn from_input(enabled: bool, raw: &str) -> TexsyncResult<Self> {
        Ok(Self {
            enabled,
            names: validate_input(raw)?,
        })
    }

    /// Build a draft from already validated names
    pub fn new(enabled: bool, names: Vec<PackageName>) -> Self {
        Self { enabled, names }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Names as typed, regardless of the toggle
    pub fn names(&self) -> &[PackageName] {
        &self.names
    }

    /// Names that should end up installed: none when the toggle is off
    pub fn effective(&self) -> &[PackageName] {
        if self.enabled {
            &self.names
        } else {
            &[]
        }
    }
}

/// Packages the installer reported as installed, in reported order without
/// duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstalledPackageSet(Vec<PackageName>);

impl InstalledPackageSet {
    /// Wrap the result of `PackageInstaller::query_installed`
    pub(crate) fn from_query(names: Vec<PackageName>) -> Self {
        let mut seen = HashSet::new();
        Self(
            names
                .into_iter()
                .filter(|name| seen.insert(name.clone()))
                .collect(),
        )
    }

    pub fn names(&self) -> &[PackageName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageName> {
        self.0.iter()
    }

    /// Space-separated form, as shown in the package field
    pub fn display(&self) -> String {
        join_names(&self.0)
    }
}
