//! Reconciliation plan: what to install and what to remove

use crate::package::name::PackageName;
use crate::package::set::InstalledPackageSet;
use std::collections::BTreeSet;

/// Difference between the desired names and the installed set.
///
/// `to_install` and `to_uninstall` never share a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub to_install: BTreeSet<PackageName>,
    pub to_uninstall: BTreeSet<PackageName>,
}

impl ReconciliationPlan {
    /// Compute the plan that turns `installed` into `desired`
    pub fn diff(installed: &InstalledPackageSet, desired: &[PackageName]) -> Self {
        let desired: BTreeSet<&PackageName> = desired.iter().collect();
        let current: BTreeSet<&PackageName> = installed.iter().collect();

        Self {
            to_install: desired.difference(&current).map(|n| (*n).clone()).collect(),
            to_uninstall: current.difference(&desired).map(|n| (*n).clone()).collect(),
        }
    }

    /// Whether applying the plan would change nothing
    pub fn is_noop(&self) -> bool {
        self.to_install.is_empty() && self.to_uninstall.is_empty()
    }

    pub fn install_batch(&self) -> Vec<PackageName> {
        self.to_install.iter().cloned().collect()
    }

    pub fn uninstall_batch(&self) -> Vec<PackageName> {
        self.to_uninstall.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::name::validate_input;

    fn installed(raw: &str) -> InstalledPackageSet {
        InstalledPackageSet::from_query(validate_input(raw).unwrap())
    }

    fn set(raw: &str) -> BTreeSet<PackageName> {
        validate_input(raw).unwrap().into_iter().collect()
    }

    #[test]
    fn add_and_remove() {
        let plan = ReconciliationPlan::diff(
            &installed("pgfplots fontspec"),
            &validate_input("amsmath pgfplots").unwrap(),
        );
        assert_eq!(plan.to_install, set("amsmath"));
        assert_eq!(plan.to_uninstall, set("fontspec"));
    }

    #[test]
    fn equal_sets_are_noop() {
        let plan = ReconciliationPlan::diff(
            &installed("amsmath tikz"),
            &validate_input("tikz amsmath amsmath").unwrap(),
        );
        assert!(plan.is_noop());
    }

    #[test]
    fn empty_desired_removes_everything() {
        let plan = ReconciliationPlan::diff(&installed("amsmath tikz"), &[]);
        assert!(plan.to_install.is_empty());
        assert_eq!(plan.to_uninstall, set("amsmath tikz"));
    }

    #[test]
    fn batches_are_disjoint_and_rebuild_desired() {
        let cases = [
            ("", "a b c"),
            ("a b c", ""),
            ("a b", "b c"),
            ("x y z", "z y x"),
            ("a a b", "b b d e"),
        ];

        for (current, wanted) in cases {
            let current_set = installed(current);
            let desired = validate_input(wanted).unwrap();
            let plan = ReconciliationPlan::diff(&current_set, &desired);

            assert!(plan.to_install.is_disjoint(&plan.to_uninstall));

            let unchanged: BTreeSet<PackageName> = current_set
                .iter()
                .filter(|n| !plan.to_uninstall.contains(*n))
                .cloned()
                .collect();
            let rebuilt: BTreeSet<PackageName> =
                unchanged.union(&plan.to_install).cloned().collect();
            assert_eq!(rebuilt, desired.into_iter().collect(), "{current} -> {wanted}");
        }
    }
}
