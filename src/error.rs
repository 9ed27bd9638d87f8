//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with the configuration file or credentials
//! - HostError: Issues fetching files from the source-control host
//! - FeedError: Issues querying the Flutter release feed
//! - RegistryError: Issues with the pub.dev package registry
//! - PublishError: Issues delivering the Slack notification

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Source-control host related errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// Flutter release feed related errors
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Slack publishing related errors
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Errors related to configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the configuration file
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("failed to parse configuration file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A required environment variable is missing
    #[error("missing required environment variable {name}")]
    MissingCredential { name: String },
}

/// Errors related to fetching repository files from the hosting API
#[derive(Error, Debug)]
pub enum HostError {
    /// Repository URL is not a recognized GitHub URL
    #[error("invalid GitHub repository URL: {url}")]
    InvalidUrl { url: String },

    /// Network request failed
    #[error("failed to fetch {path} from {repo}: {message}")]
    Network {
        repo: String,
        path: String,
        message: String,
    },

    /// Response could not be decoded into file content
    #[error("invalid response for {path} from {repo}: {message}")]
    InvalidResponse {
        repo: String,
        path: String,
        message: String,
    },

    /// Request exceeded the per-request deadline
    #[error("timeout while fetching {path} from {repo}")]
    Timeout { repo: String, path: String },
}

/// Errors related to the Flutter release feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network request failed
    #[error("failed to query Flutter release feed: {message}")]
    Network { message: String },

    /// The feed answered but contained no usable stable release
    #[error("no stable release found in Flutter release feed")]
    NoStableRelease,
}

/// Errors related to pub.dev registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in the registry
    #[error("package '{package}' not found on pub.dev")]
    PackageNotFound { package: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from pub.dev: {message}")]
    Network { package: String, message: String },

    /// Invalid response from the registry
    #[error("invalid response from pub.dev for '{package}': {message}")]
    InvalidResponse { package: String, message: String },

    /// Request exceeded the per-request deadline
    #[error("timeout while fetching '{package}' from pub.dev")]
    Timeout { package: String },
}

/// Errors related to Slack publishing
#[derive(Error, Debug)]
pub enum PublishError {
    /// A Slack Web API method returned an error
    #[error("Slack API call {method} failed: {message}")]
    Api { method: String, message: String },

    /// The spreadsheet attachment could not be uploaded
    #[error("failed to upload report attachment: {message}")]
    Upload { message: String },
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingCredential error
    pub fn missing_credential(name: impl Into<String>) -> Self {
        ConfigError::MissingCredential { name: name.into() }
    }
}

impl HostError {
    /// Creates a new InvalidUrl error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        HostError::InvalidUrl { url: url.into() }
    }

    /// Creates a new Network error
    pub fn network(
        repo: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        HostError::Network {
            repo: repo.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        repo: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        HostError::InvalidResponse {
            repo: repo.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(repo: impl Into<String>, path: impl Into<String>) -> Self {
        HostError::Timeout {
            repo: repo.into(),
            path: path.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new Network error
    pub fn network(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Network {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
        }
    }
}

impl PublishError {
    /// Creates a new Api error
    pub fn api(method: impl Into<String>, message: impl Into<String>) -> Self {
        PublishError::Api {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Creates a new Upload error
    pub fn upload(message: impl Into<String>) -> Self {
        PublishError::Upload {
            message: message.into(),
        }
    }
}
