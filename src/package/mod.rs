//! Package names, sets and reconciliation plans

pub mod name;
pub mod plan;
pub mod set;

pub use name::{join_names, validate_input, PackageName};
pub use plan::ReconciliationPlan;
pub use set::{DesiredPackageSet, InstalledPackageSet};
