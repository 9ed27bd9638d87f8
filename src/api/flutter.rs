//! Flutter release feed adapter
//!
//! The primary source is the release index on Google storage; when it is
//! unreachable the GitHub releases API serves as fallback. Neither source
//! answering is run-fatal for the caller.

use crate::api::{HttpClient, SdkReleaseFeed};
use crate::error::FeedError;
use async_trait::async_trait;
use serde::Deserialize;

const RELEASES_INDEX_URL: &str =
    "https://storage.googleapis.com/flutter_infra_release/releases/releases_linux.json";
const GITHUB_RELEASES_URL: &str = "https://api.github.com/repos/flutter/flutter/releases";

/// Flutter release feed adapter
pub struct FlutterReleaseFeed {
    client: HttpClient,
}

/// Release index on Google storage
#[derive(Debug, Deserialize)]
struct ReleasesIndex {
    releases: Vec<ReleaseEntry>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    channel: String,
    version: String,
}

/// One release from the GitHub releases API
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    prerelease: bool,
    draft: bool,
}

impl FlutterReleaseFeed {
    /// Create a new feed adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    async fn fetch_from_index(&self) -> Result<String, FeedError> {
        let index: ReleasesIndex = self
            .client
            .get_json(RELEASES_INDEX_URL, &[])
            .await
            .map_err(|e| FeedError::Network {
                message: e.to_string(),
            })?;

        index
            .releases
            .into_iter()
            .find(|r| r.channel == "stable")
            .map(|r| r.version)
            .ok_or(FeedError::NoStableRelease)
    }

    async fn fetch_from_github(&self) -> Result<String, FeedError> {
        let releases: Vec<GitHubRelease> = self
            .client
            .get_json(
                GITHUB_RELEASES_URL,
                &[("Accept", "application/vnd.github.v3+json")],
            )
            .await
            .map_err(|e| FeedError::Network {
                message: e.to_string(),
            })?;

        releases
            .into_iter()
            .find(|r| !r.prerelease && !r.draft && !r.tag_name.contains('-'))
            .map(|r| r.tag_name.trim_start_matches('v').to_string())
            .ok_or(FeedError::NoStableRelease)
    }
}

#[async_trait]
impl SdkReleaseFeed for FlutterReleaseFeed {
    async fn latest_stable(&self) -> Result<String, FeedError> {
        match self.fetch_from_index().await {
            Ok(version) => Ok(version),
            Err(_) => self.fetch_from_github().await,
        }
    }
}
