//! Dependency specifications extracted from pubspec manifests

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel constraint meaning "unconstrained"
pub const ANY_CONSTRAINT: &str = "any";

/// A package name with its declared version constraint
///
/// The constraint is either a literal version, a range expression such as
/// `^1.2.0` or `>=1.0.0 <2.0.0`, the sentinel `any`, or a source-control or
/// local-path locator string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Package name as it appears in the manifest
    pub name: String,
    /// Declared version constraint
    pub constraint: String,
}

impl DependencySpec {
    /// Creates a new dependency spec
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates a dependency spec with the sentinel `any` constraint
    pub fn unconstrained(name: impl Into<String>) -> Self {
        Self::new(name, ANY_CONSTRAINT)
    }

    /// Returns true if the constraint carries no version information
    pub fn is_unconstrained(&self) -> bool {
        self.constraint.is_empty() || self.constraint == ANY_CONSTRAINT
    }

    /// Returns true if the constraint points at a git or local-path source
    ///
    /// Such dependencies have no fixed upstream to compare against and are
    /// excluded before version resolution.
    pub fn has_scm_locator(&self) -> bool {
        self.constraint.contains("git:") || self.constraint.contains("path:")
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_spec_new() {
        let spec = DependencySpec::new("provider", "^6.0.5");
        assert_eq!(spec.name, "provider");
        assert_eq!(spec.constraint, "^6.0.5");
    }

    #[test]
    fn test_unconstrained_sentinel() {
        let spec = DependencySpec::unconstrained("intl");
        assert_eq!(spec.constraint, ANY_CONSTRAINT);
        assert!(spec.is_unconstrained());
    }

    #[test]
    fn test_empty_constraint_is_unconstrained() {
        let spec = DependencySpec::new("intl", "");
        assert!(spec.is_unconstrained());
    }

    #[test]
    fn test_versioned_constraint_is_not_unconstrained() {
        let spec = DependencySpec::new("dio", "^5.0.0");
        assert!(!spec.is_unconstrained());
    }

    #[test]
    fn test_git_locator() {
        let spec = DependencySpec::new("internal_ui", "git: https://github.com/acme/ui.git");
        assert!(spec.has_scm_locator());
    }

    #[test]
    fn test_path_locator() {
        let spec = DependencySpec::new("shared", "path: ../shared");
        assert!(spec.has_scm_locator());
    }

    #[test]
    fn test_plain_version_has_no_locator() {
        let spec = DependencySpec::new("dio", "^5.0.0");
        assert!(!spec.has_scm_locator());
    }

    #[test]
    fn test_display() {
        let spec = DependencySpec::new("provider", "^6.0.5");
        assert_eq!(format!("{}", spec), "provider@^6.0.5");
    }
}
