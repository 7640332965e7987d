//! Badge coverage check for enum cases.
//!
//! Enums whose cases carry a badge classification render better as badges.
//! This check is informational only and never blocks configuration.

use std::fmt;

use indexmap::IndexMap;

use crate::value::EnumCase;

/// Cases of one enum that have no badge classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeCoverageWarning {
    pub enum_name: String,
    pub missing: Vec<String>,
}

impl fmt::Display for BadgeCoverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "enum {} should classify every case as a badge to render well in an enum field (unclassified: {})",
            self.enum_name,
            self.missing.join(", ")
        )
    }
}

/// One warning per enum, in order of first appearance, listing the cases
/// without a badge classification.
pub fn check_badge_coverage(cases: &[EnumCase]) -> Vec<BadgeCoverageWarning> {
    let mut missing: IndexMap<&str, Vec<String>> = IndexMap::new();
    for case in cases {
        let entry = missing.entry(case.enum_name()).or_default();
        if case.badge().is_none() {
            entry.push(case.name().to_string());
        }
    }

    missing
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .map(|(enum_name, names)| BadgeCoverageWarning {
            enum_name: enum_name.to_string(),
            missing: names,
        })
        .collect()
}
