//! PyPI registry client for fetching the latest Python package version

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::REGISTRY_TIMEOUT_SECS;
use crate::registry::{Registry, RegistryError, RegistryKind};

const DEFAULT_PYPI_REGISTRY: &str = "https://pypi.org";

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PYPI_REGISTRY)
    }
}

impl PypiRegistry {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent("version-hook")
                .timeout(Duration::from_secs(REGISTRY_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
}

/// Package information from PyPI
#[derive(Debug, Deserialize)]
struct PypiInfo {
    /// Latest version (according to PyPI)
    version: String,
}

#[async_trait]
impl Registry for PypiRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Pypi
    }

    async fn latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_name);
        debug!("Fetching PyPI package: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !response.status().is_success() {
            return Err(RegistryError::InvalidResponse(format!(
                "PyPI API returned status {}",
                response.status()
            )));
        }

        let pypi_response: PypiResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;

        Ok(pypi_response.info.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn latest_version_returns_info_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/requests/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "info": {"version": "2.32.5"},
                    "releases": {
                        "2.31.0": [],
                        "2.32.0": [],
                        "2.32.5": []
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = PypiRegistry::new(&server.url());
        let result = registry.latest_version("requests").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, "2.32.5");
    }

    #[tokio::test]
    async fn latest_version_returns_not_found_for_missing_package() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/nonexistent/json")
            .with_status(404)
            .create_async()
            .await;

        let registry = PypiRegistry::new(&server.url());
        let result = registry.latest_version("nonexistent").await;

        mock.assert_async().await;

        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn latest_version_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/flask/json")
            .with_status(500)
            .create_async()
            .await;

        let registry = PypiRegistry::new(&server.url());
        let result = registry.latest_version("flask").await;

        mock.assert_async().await;

        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn latest_version_handles_network_error() {
        // Use an invalid URL to trigger a network error
        let registry = PypiRegistry::new("http://invalid.localhost.test:99999");
        let result = registry.latest_version("requests").await;

        assert!(matches!(result, Err(RegistryError::Network(_))));
    }
}
