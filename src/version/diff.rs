//! VersionDiff and the installed-vs-latest resolver

use tracing::debug;

use crate::registry::Registry;
use crate::version::major::major_version;

/// A package whose installed major version differs from the registry's latest.
///
/// Never constructed with equal majors; `resolve_diff` is the only producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDiff {
    /// Package name as it appears in the manifest or command
    pub package: String,
    /// Version constraint recorded locally (e.g., "^17.0.2")
    pub installed_version: String,
    pub installed_major: u64,
    /// Latest version published on the registry
    pub latest_version: String,
    pub latest_major: u64,
}

/// Checks whether a package's installed major version differs from the
/// registry's latest.
///
/// Returns `None` when the installed or latest major cannot be determined,
/// when the registry lookup fails, or when the majors match. Registry
/// failures are downgraded here: a package we cannot check is simply not a
/// diff.
pub async fn resolve_diff(
    registry: &dyn Registry,
    package: &str,
    installed_version: &str,
) -> Option<VersionDiff> {
    let installed_major = major_version(installed_version)?;

    debug!("Querying {} registry for {}", registry.kind().as_str(), package);

    let latest_version = match registry.latest_version(package).await {
        Ok(version) => version,
        Err(e) => {
            debug!("Latest version unavailable for {}: {}", package, e);
            return None;
        }
    };

    let latest_major = major_version(&latest_version)?;

    if installed_major == latest_major {
        return None;
    }

    Some(VersionDiff {
        package: package.to_string(),
        installed_version: installed_version.to_string(),
        installed_major,
        latest_version,
        latest_major,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MockRegistry, RegistryError, RegistryKind};

    fn registry_returning(version: &str) -> MockRegistry {
        let version = version.to_string();
        let mut registry = MockRegistry::new();
        registry
            .expect_latest_version()
            .returning(move |_| Ok(version.clone()));
        registry
            .expect_kind()
            .times(1)
            .return_const(RegistryKind::Npm);
        registry
    }

    #[tokio::test]
    async fn resolve_diff_emits_diff_when_majors_differ() {
        let registry = registry_returning("18.2.0");

        let diff = resolve_diff(&registry, "react", "^17.0.2").await.unwrap();

        assert_eq!(
            diff,
            VersionDiff {
                package: "react".to_string(),
                installed_version: "^17.0.2".to_string(),
                installed_major: 17,
                latest_version: "18.2.0".to_string(),
                latest_major: 18,
            }
        );
    }

    #[tokio::test]
    async fn resolve_diff_returns_none_when_majors_match() {
        let registry = registry_returning("17.9.0");

        let diff = resolve_diff(&registry, "react-dom", "^17.0.2").await;

        assert_eq!(diff, None);
    }

    #[tokio::test]
    async fn resolve_diff_returns_none_without_installed_major() {
        let mut registry = MockRegistry::new();
        // The registry must never be consulted when the installed version
        // has no major to compare against.
        registry.expect_kind().never();
        registry.expect_latest_version().never();

        let diff = resolve_diff(&registry, "lodash", "latest").await;

        assert_eq!(diff, None);
    }

    #[tokio::test]
    async fn resolve_diff_returns_none_on_registry_failure() {
        let mut registry = MockRegistry::new();
        registry.expect_kind().return_const(RegistryKind::Npm);
        registry
            .expect_latest_version()
            .returning(|name| Err(RegistryError::NotFound(name.to_string())));

        let diff = resolve_diff(&registry, "lodash", "^4.17.21").await;

        assert_eq!(diff, None);
    }

    #[tokio::test]
    async fn resolve_diff_returns_none_when_latest_has_no_major() {
        let registry = registry_returning("unknown");

        let diff = resolve_diff(&registry, "lodash", "^4.17.21").await;

        assert_eq!(diff, None);
    }
}
