//! pub.dev registry adapter
//!
//! Fetches package metadata from https://pub.dev/api/packages/{package}
//! and reads the latest published version out of it.

use crate::api::{HttpClient, HttpFailure, PackageRegistry};
use crate::error::RegistryError;
use async_trait::async_trait;
use serde::Deserialize;

const PUB_DEV_API_URL: &str = "https://pub.dev/api/packages";

/// pub.dev adapter
pub struct PubDevRegistry {
    client: HttpClient,
}

/// Package metadata response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct PackageResponse {
    latest: Option<LatestRelease>,
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    version: Option<String>,
}

impl PubDevRegistry {
    /// Create a new pub.dev adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the metadata URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", PUB_DEV_API_URL, package)
    }
}

#[async_trait]
impl PackageRegistry for PubDevRegistry {
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PackageResponse = self
            .client
            .get_json(&url, &[("Accept", "application/json")])
            .await
            .map_err(|e| match e {
                HttpFailure::NotFound => RegistryError::package_not_found(package),
                HttpFailure::Timeout => RegistryError::timeout(package),
                HttpFailure::Decode(msg) => RegistryError::invalid_response(package, msg),
                other => RegistryError::network(package, other.to_string()),
            })?;

        response
            .latest
            .and_then(|latest| latest.version)
            .ok_or_else(|| {
                RegistryError::invalid_response(package, "no latest version in metadata")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = HttpClient::new().unwrap();
        let registry = PubDevRegistry::new(client);
        assert_eq!(
            registry.build_url("provider"),
            "https://pub.dev/api/packages/provider"
        );
    }

    #[test]
    fn test_package_response_deserializes() {
        let body = r#"{"name": "provider", "latest": {"version": "6.1.2", "pubspec": {}}}"#;
        let response: PackageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.latest.unwrap().version.as_deref(), Some("6.1.2"));
    }

    #[test]
    fn test_package_response_without_latest() {
        let body = r#"{"name": "provider"}"#;
        let response: PackageResponse = serde_json::from_str(body).unwrap();
        assert!(response.latest.is_none());
    }
}
