//! Configuration assembly
//!
//! The repository list comes from a JSON file, credentials from the process
//! environment. Both are read exactly once at startup into a `Config` value
//! that is passed into every component; nothing else reads the environment.

use crate::cli::CliArgs;
use crate::domain::RepositoryRef;
use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory
const DEFAULT_CONFIG_FILE: &str = "repositories.json";

/// Environment variable naming an alternative configuration file
const CONFIG_PATH_VAR: &str = "REPOSITORIES_CONFIG";

/// Shape of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoriesFile {
    /// Target repositories, checked in this order
    pub repositories: Vec<RepositoryRef>,
    /// Optional settings block
    #[serde(default)]
    pub settings: Settings,
}

/// Settings block of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Whether dev_dependencies are checked as well
    #[serde(default, rename = "includeDevDeps")]
    pub include_dev_deps: bool,
}

/// Fully assembled runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Target repositories, checked in this order
    pub repositories: Vec<RepositoryRef>,
    /// Whether dev_dependencies are checked as well
    pub include_dev_deps: bool,
    /// Slack bot token used for posting and uploads
    pub slack_token: String,
    /// Destination Slack channel ID
    pub slack_channel: String,
    /// Optional GitHub token for private repositories and rate limits
    pub github_token: Option<String>,
}

impl RepositoriesFile {
    /// Load and parse the configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::not_found(path));
        }
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::parse_error(path, e.to_string()))
    }
}

impl Config {
    /// Assemble the full configuration from CLI arguments, the configuration
    /// file, and the process environment
    pub fn assemble(args: &CliArgs) -> Result<Self, ConfigError> {
        let path = config_path(args);
        let file = RepositoriesFile::load(&path)?;

        let slack_token = require_env("SLACK_BOT_TOKEN")?;
        let slack_channel = require_env("SLACK_CHANNEL")?;
        let github_token = env::var("GH_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            repositories: file.repositories,
            include_dev_deps: file.settings.include_dev_deps || args.include_dev_deps,
            slack_token,
            slack_channel,
            github_token,
        })
    }
}

/// Resolve the configuration file path: flag, then env var, then default
fn config_path(args: &CliArgs) -> PathBuf {
    args.config
        .clone()
        .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing_credential(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repositories.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"{
                "repositories": [
                    {"name": "app", "url": "https://github.com/acme/app"},
                    {"name": "sdk", "url": "https://github.com/acme/sdk", "description": "client SDK"}
                ],
                "settings": {"includeDevDeps": true}
            }"#,
        );
        let file = RepositoriesFile::load(&path).unwrap();
        assert_eq!(file.repositories.len(), 2);
        assert_eq!(file.repositories[0].name, "app");
        assert!(file.settings.include_dev_deps);
    }

    #[test]
    fn test_load_without_settings_block() {
        let (_dir, path) = write_config(
            r#"{"repositories": [{"name": "app", "url": "https://github.com/acme/app"}]}"#,
        );
        let file = RepositoriesFile::load(&path).unwrap();
        assert!(!file.settings.include_dev_deps);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RepositoriesFile::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let (_dir, path) = write_config("{not json");
        let err = RepositoriesFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_config_path_prefers_flag() {
        let args = crate::cli::CliArgs {
            config: Some(PathBuf::from("/tmp/custom.json")),
            dry_run: false,
            include_dev_deps: false,
            json: false,
            verbose: false,
            quiet: false,
        };
        assert_eq!(config_path(&args), PathBuf::from("/tmp/custom.json"));
    }
}
