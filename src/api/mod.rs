//! External collaborators behind narrow contracts
//!
//! This module provides:
//! - HTTP client shared foundation with a fixed per-request deadline
//! - GitHub contents API adapter for repository files
//! - Flutter release feed adapter with a fallback source
//! - pub.dev registry adapter for package versions

mod client;
mod flutter;
mod github;
mod pub_dev;

pub use client::{HttpClient, HttpFailure};
pub use flutter::FlutterReleaseFeed;
pub use github::GitHubHost;
pub use pub_dev::PubDevRegistry;

use crate::error::{FeedError, HostError, RegistryError};
use async_trait::async_trait;

/// Fetches files from a source-control hosting API
#[async_trait]
pub trait FileHost: Send + Sync {
    /// Returns the file content, or None when the file does not exist
    ///
    /// A missing file is a valid outcome; only network or auth failures
    /// surface as errors.
    async fn fetch_file(&self, repo_url: &str, path: &str) -> Result<Option<String>, HostError>;
}

/// Resolves the latest published stable SDK version
#[async_trait]
pub trait SdkReleaseFeed: Send + Sync {
    async fn latest_stable(&self) -> Result<String, FeedError>;
}

/// Resolves the latest published version of a package
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}
