//! Redundant @types/* filtering
//!
//! A type-declaration package's major version is versioned independently of
//! its base package, so when both show a diff the @types entry would
//! double-report the same underlying upgrade.

use std::collections::HashSet;

use tracing::info;

use crate::version::diff::VersionDiff;

/// Namespace prefix for type-declaration shadow packages
const TYPES_PREFIX: &str = "@types/";

/// Removes @types/* diffs whose base package is also present among the diffs.
///
/// Order of surviving diffs is preserved. Idempotent.
pub fn filter_redundant_types(diffs: Vec<VersionDiff>) -> Vec<VersionDiff> {
    let base_packages: HashSet<&str> = diffs
        .iter()
        .filter(|d| !d.package.starts_with(TYPES_PREFIX))
        .map(|d| d.package.as_str())
        .collect();

    let mut filtered = Vec::with_capacity(diffs.len());
    for diff in &diffs {
        if let Some(base_name) = diff.package.strip_prefix(TYPES_PREFIX)
            && base_packages.contains(base_name)
        {
            info!("Skipping {} (redundant with {})", diff.package, base_name);
            continue;
        }
        filtered.push(diff.clone());
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(package: &str) -> VersionDiff {
        VersionDiff {
            package: package.to_string(),
            installed_version: "^4.0.0".to_string(),
            installed_major: 4,
            latest_version: "5.0.0".to_string(),
            latest_major: 5,
        }
    }

    #[test]
    fn drops_types_package_when_base_is_present() {
        let diffs = vec![diff("lodash"), diff("@types/lodash")];

        let filtered = filter_redundant_types(diffs);

        assert_eq!(filtered, vec![diff("lodash")]);
    }

    #[test]
    fn keeps_types_package_without_base() {
        let diffs = vec![diff("@types/express"), diff("lodash")];

        let filtered = filter_redundant_types(diffs.clone());

        assert_eq!(filtered, diffs);
    }

    #[test]
    fn preserves_order_of_survivors() {
        let diffs = vec![
            diff("react"),
            diff("@types/react"),
            diff("lodash"),
            diff("@types/node"),
        ];

        let filtered = filter_redundant_types(diffs);

        assert_eq!(
            filtered,
            vec![diff("react"), diff("lodash"), diff("@types/node")]
        );
    }

    #[test]
    fn is_idempotent() {
        let diffs = vec![diff("lodash"), diff("@types/lodash"), diff("@types/jest")];

        let once = filter_redundant_types(diffs);
        let twice = filter_redundant_types(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_redundant_types(Vec::new()).is_empty());
    }
}
