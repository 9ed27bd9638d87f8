//! GitHub contents API adapter
//!
//! Fetches repository files via the contents endpoint:
//! https://api.github.com/repos/{owner}/{repo}/contents/{path}
//! The payload carries the file as base64 with embedded line breaks.

use crate::api::{FileHost, HttpClient, HttpFailure};
use crate::error::HostError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

const GITHUB_API_URL: &str = "https://api.github.com";

static REPO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").unwrap());

/// GitHub hosting adapter
pub struct GitHubHost {
    client: HttpClient,
    token: Option<String>,
}

/// Contents endpoint response
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
}

impl GitHubHost {
    /// Create a new adapter; the token is optional for public repositories
    pub fn new(client: HttpClient, token: Option<String>) -> Self {
        Self { client, token }
    }

    /// Split a repository URL into its owner and name
    fn parse_repo_url(url: &str) -> Result<(String, String), HostError> {
        let caps = REPO_URL_RE
            .captures(url)
            .ok_or_else(|| HostError::invalid_url(url))?;
        let owner = caps[1].to_string();
        let repo = caps[2].trim_end_matches(".git").to_string();
        Ok((owner, repo))
    }

    fn decode_content(repo: &str, path: &str, encoded: &str) -> Result<String, HostError> {
        // the API wraps the base64 payload at 60 columns
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| HostError::invalid_response(repo, path, format!("bad base64: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| HostError::invalid_response(repo, path, format!("not UTF-8: {}", e)))
    }
}

#[async_trait]
impl FileHost for GitHubHost {
    async fn fetch_file(&self, repo_url: &str, path: &str) -> Result<Option<String>, HostError> {
        let (owner, repo) = Self::parse_repo_url(repo_url)?;
        let slug = format!("{}/{}", owner, repo);
        let url = format!("{}/repos/{}/contents/{}", GITHUB_API_URL, slug, path);

        let bearer;
        let mut headers = vec![("Accept", "application/vnd.github.v3+json")];
        if let Some(token) = &self.token {
            bearer = format!("Bearer {}", token);
            headers.push(("Authorization", bearer.as_str()));
        }

        match self.client.get_json::<ContentsResponse>(&url, &headers).await {
            Ok(body) => Self::decode_content(&slug, path, &body.content).map(Some),
            Err(HttpFailure::NotFound) => Ok(None),
            Err(HttpFailure::Timeout) => Err(HostError::timeout(slug, path)),
            Err(HttpFailure::Decode(msg)) => Err(HostError::invalid_response(slug, path, msg)),
            Err(e) => Err(HostError::network(slug, path, e.to_string())),
        }
    }
}
