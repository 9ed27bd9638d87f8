//! Per-package and per-repository check results

use super::RepositoryRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel shown when the latest version of a package could not be resolved
pub const LATEST_UNKNOWN: &str = "N/A";

/// Pinned SDK version compared against the latest published release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkStatus {
    /// Effective pinned version for the repository
    pub current: String,
    /// Latest published stable version
    pub latest: String,
    /// Whether the pin differs from the latest release
    pub update_available: bool,
}

impl SdkStatus {
    /// Creates a status from a resolved pin; the update flag is plain
    /// inequality between the two version strings
    pub fn new(current: impl Into<String>, latest: impl Into<String>) -> Self {
        let current = current.into();
        let latest = latest.into();
        let update_available = current != latest;
        Self {
            current,
            latest,
            update_available,
        }
    }

    /// Status used when a repository check failed before the pin was resolved
    pub fn unknown(latest: impl Into<String>) -> Self {
        Self {
            current: "unknown".to_string(),
            latest: latest.into(),
            update_available: false,
        }
    }
}

/// Result of checking one package dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageStatus {
    /// Package name
    pub name: String,
    /// Declared constraint from the manifest
    pub current: String,
    /// Latest published version, or `N/A` when resolution failed
    pub latest: String,
    /// Whether a newer version outside the declared constraint exists
    pub update_available: bool,
}

impl PackageStatus {
    /// Creates a resolved package status
    pub fn new(
        name: impl Into<String>,
        current: impl Into<String>,
        latest: impl Into<String>,
        update_available: bool,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: latest.into(),
            update_available,
        }
    }

    /// Creates a status for a package whose registry lookup failed
    pub fn unresolved(name: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: LATEST_UNKNOWN.to_string(),
            update_available: false,
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.update_available {
            write!(f, "{}: {} → {}", self.name, self.current, self.latest)
        } else {
            write!(f, "{}: {}", self.name, self.current)
        }
    }
}

/// Aggregated result for one configured repository
///
/// When `error` is present it supersedes the rest: the package list is empty
/// and the SDK status defaults to an unknown pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
    /// The repository that was checked
    pub repository: RepositoryRef,
    /// SDK pin comparison
    pub sdk: SdkStatus,
    /// Per-dependency results in manifest order
    pub packages: Vec<PackageStatus>,
    /// Error that aborted the check, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepositoryReport {
    /// Creates a successful report
    pub fn success(repository: RepositoryRef, sdk: SdkStatus, packages: Vec<PackageStatus>) -> Self {
        Self {
            repository,
            sdk,
            packages,
            error: None,
        }
    }

    /// Creates a report for a repository whose check failed
    pub fn failure(
        repository: RepositoryRef,
        latest_sdk: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            sdk: SdkStatus::unknown(latest_sdk),
            packages: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Returns true if the check failed
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Packages with an update available, in manifest order
    pub fn outdated_packages(&self) -> Vec<&PackageStatus> {
        self.packages.iter().filter(|p| p.update_available).collect()
    }

    /// Returns true if the SDK pin or any package has an update available
    pub fn has_updates(&self) -> bool {
        !self.is_failure() && (self.sdk.update_available || self.packages.iter().any(|p| p.update_available))
    }
}
