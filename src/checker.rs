//! Repository check orchestration
//!
//! Workflow per repository: fetch pin file → fetch manifest → parse →
//! resolve effective pin → check each dependency. Failures are isolated at
//! two levels: a fetch or parse failure fails that repository only, and a
//! registry lookup failure fails that dependency only.

use crate::api::{FileHost, PackageRegistry};
use crate::domain::{PackageStatus, RepositoryRef, RepositoryReport, SdkStatus};
use crate::manifest;
use crate::progress::Progress;
use crate::version;

/// Path of the version-pin file inside a repository
pub const PIN_FILE_PATH: &str = ".fvmrc";

/// Path of the dependency manifest inside a repository
pub const MANIFEST_PATH: &str = "pubspec.yaml";

/// Checks repositories one at a time against the hosting API and pub.dev
pub struct RepositoryChecker<'a> {
    host: &'a dyn FileHost,
    registry: &'a dyn PackageRegistry,
    latest_sdk: String,
    include_dev_deps: bool,
}

impl<'a> RepositoryChecker<'a> {
    /// Create a checker for one run
    ///
    /// `latest_sdk` is resolved once per run and passed by value into every
    /// check; it doubles as the pin fallback when a repository declares none.
    pub fn new(
        host: &'a dyn FileHost,
        registry: &'a dyn PackageRegistry,
        latest_sdk: impl Into<String>,
        include_dev_deps: bool,
    ) -> Self {
        Self {
            host,
            registry,
            latest_sdk: latest_sdk.into(),
            include_dev_deps,
        }
    }

    /// Check every configured repository in order
    ///
    /// Always returns exactly one report per repository; individual failures
    /// contribute an error-carrying report and the run proceeds.
    pub async fn run_batch(
        &self,
        repositories: &[RepositoryRef],
        progress: &mut Progress,
    ) -> Vec<RepositoryReport> {
        let mut reports = Vec::with_capacity(repositories.len());

        progress.start(repositories.len() as u64, "Checking repositories");
        for repository in repositories {
            progress.set_message(&repository.name);
            reports.push(self.check(repository).await);
            progress.inc();
        }
        progress.finish_and_clear();

        reports
    }

    /// Check one repository, converting any fatal step into an error report
    pub async fn check(&self, repository: &RepositoryRef) -> RepositoryReport {
        match self.check_inner(repository).await {
            Ok(report) => report,
            Err(message) => {
                RepositoryReport::failure(repository.clone(), self.latest_sdk.as_str(), message)
            }
        }
    }

    async fn check_inner(&self, repository: &RepositoryRef) -> Result<RepositoryReport, String> {
        // A missing pin file is a normal outcome; any other fetch failure is
        // fatal for this repository.
        let pinned = match self.host.fetch_file(&repository.url, PIN_FILE_PATH).await {
            Ok(Some(text)) => manifest::sdk_version_from_pin_file(&text),
            Ok(None) => None,
            Err(e) => return Err(e.to_string()),
        };

        // The manifest is mandatory, so here a 404 is fatal too.
        let manifest_text = self
            .host
            .fetch_file(&repository.url, MANIFEST_PATH)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("{} not found in repository", MANIFEST_PATH))?;

        let document = manifest::parse_document(&manifest_text)
            .map_err(|e| format!("failed to parse {}: {}", MANIFEST_PATH, e))?;
        if document.is_null() {
            return Err(format!("failed to parse {}: document is empty", MANIFEST_PATH));
        }

        let current_sdk = pinned
            .or_else(|| manifest::sdk_version_from_pubspec(&manifest_text))
            .unwrap_or_else(|| self.latest_sdk.clone());
        let sdk = SdkStatus::new(current_sdk, self.latest_sdk.as_str());

        let specs = manifest::extract_dependencies(&document, self.include_dev_deps);

        let mut packages = Vec::new();
        for spec in specs {
            if spec.is_unconstrained() || spec.has_scm_locator() {
                continue;
            }
            let status = match self.registry.latest_version(&spec.name).await {
                Ok(latest) => {
                    let update_available = version::is_update_available(&spec.constraint, &latest);
                    PackageStatus::new(spec.name, spec.constraint, latest, update_available)
                }
                Err(_) => PackageStatus::unresolved(spec.name, spec.constraint),
            };
            packages.push(status);
        }

        Ok(RepositoryReport::success(repository.clone(), sdk, packages))
    }
}
