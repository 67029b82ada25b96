//! Registry clients for looking up the latest published version of a package

pub mod npm;
pub mod pypi;

pub use npm::NpmRegistry;
pub use pypi::PypiRegistry;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Kind of package registry a manager resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// npm registry (npm, yarn, pnpm, bun)
    Npm,
    /// PyPI (pip)
    Pypi,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Npm => "npm",
            RegistryKind::Pypi => "pypi",
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for fetching the latest published version of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the kind of registry this implementation handles
    fn kind(&self) -> RegistryKind;

    /// Fetches the latest published version string for a package
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "lodash", "requests")
    ///
    /// # Returns
    /// * `Ok(String)` - The latest version as published by the registry
    /// * `Err(RegistryError)` - If the fetch fails or the response is unusable
    async fn latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}
