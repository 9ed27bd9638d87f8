//! Version comparison over pubspec constraints
//!
//! Handles constraint formats:
//! - Exact: `1.2.3`
//! - Caret: `^1.2.3`
//! - Tilde: `~1.2.3`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Range: `>=1.0.0 <2.0.0`
//!
//! Unparsable input on either side is never reported as updatable.

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The most significant version component that differs between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// Major component increased
    Major,
    /// Minor component increased
    Minor,
    /// Patch component increased
    Patch,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Major => write!(f, "major"),
            UpdateKind::Minor => write!(f, "minor"),
            UpdateKind::Patch => write!(f, "patch"),
        }
    }
}

/// Extracts the base version from a constraint expression
///
/// Leading range operators and whitespace are stripped and only the first
/// whitespace-delimited token is kept, so `>=1.0.0 <2.0.0` yields `1.0.0`.
fn base_version(constraint: &str) -> &str {
    constraint
        .trim_start_matches(|c: char| matches!(c, '^' | '~' | '>' | '=' | '<') || c.is_whitespace())
        .split_whitespace()
        .next()
        .unwrap_or("")
}

/// Parses a constraint expression into a semver requirement
///
/// Two normalizations bridge pubspec range syntax and `VersionReq`:
/// comparators are whitespace-separated in a pubspec but comma-separated in
/// `VersionReq`, and a bare version means exactly that version in a pubspec
/// while `VersionReq` would default it to a caret range.
fn parse_requirement(constraint: &str) -> Option<VersionReq> {
    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in constraint.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        if matches!(token, "^" | "~" | ">" | ">=" | "<" | "<=" | "=") {
            pending_op = Some(token);
        } else if let Some(op) = pending_op.take() {
            comparators.push(format!("{op}{token}"));
        } else if token.starts_with(|c: char| c.is_ascii_digit()) {
            comparators.push(format!("={token}"));
        } else {
            comparators.push(token.to_string());
        }
    }

    if comparators.is_empty() {
        return None;
    }
    VersionReq::parse(&comparators.join(", ")).ok()
}

/// Returns true if the constraint expression already permits the candidate
fn constraint_allows(constraint: &str, candidate: &Version) -> bool {
    parse_requirement(constraint)
        .map(|req| req.matches(candidate))
        .unwrap_or(false)
}

/// Decides whether a newer version should be reported for a constraint
///
/// True iff both sides are valid semver, the candidate is strictly greater
/// than the constraint's base version, and the candidate does not already
/// satisfy the constraint expression. The second condition keeps a package
/// whose range already admits the fetched latest (say `^1.2.0` against
/// `1.5.0`) from being flagged, and for wide ranges such as `>=1.0.0` it
/// suppresses the flag even across a major bump.
pub fn is_update_available(current_constraint: &str, latest: &str) -> bool {
    let base = base_version(current_constraint);
    let (Ok(current), Ok(candidate)) = (Version::parse(base), Version::parse(latest)) else {
        return false;
    };
    candidate > current && !constraint_allows(current_constraint, &candidate)
}

/// Classifies the update between a constraint's base version and a candidate
///
/// Components are compared most significant first, so a major bump is
/// reported even when minor and patch also differ. None when either side
/// fails validation or nothing increased.
pub fn classify_update(current_constraint: &str, latest: &str) -> Option<UpdateKind> {
    let current = Version::parse(base_version(current_constraint)).ok()?;
    let latest = Version::parse(latest).ok()?;

    if latest.major > current.major {
        Some(UpdateKind::Major)
    } else if latest.minor > current.minor {
        Some(UpdateKind::Minor)
    } else if latest.patch > current.patch {
        Some(UpdateKind::Patch)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_version_strips_operators() {
        assert_eq!(base_version("^1.2.3"), "1.2.3");
        assert_eq!(base_version("~1.2.3"), "1.2.3");
        assert_eq!(base_version(">=1.2.3"), "1.2.3");
        assert_eq!(base_version("  >= 1.2.3"), "1.2.3");
        assert_eq!(base_version("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_base_version_takes_first_token() {
        assert_eq!(base_version(">=1.0.0 <2.0.0"), "1.0.0");
    }

    #[test]
    fn test_update_available_exact_constraint() {
        assert!(is_update_available("1.2.3", "1.2.4"));
        assert!(is_update_available("1.2.3", "2.0.0"));
    }

    #[test]
    fn test_no_update_when_equal() {
        assert!(!is_update_available("1.2.3", "1.2.3"));
    }

    #[test]
    fn test_no_update_when_older() {
        assert!(!is_update_available("2.0.0", "1.9.9"));
    }

    #[test]
    fn test_range_already_satisfies_latest() {
        // ^1.2.0 admits 1.5.0, so no update is flagged even though it is
        // numerically greater
        assert!(!is_update_available("^1.2.0", "1.5.0"));
    }

    #[test]
    fn test_caret_range_excludes_major_bump() {
        assert!(is_update_available("^1.2.0", "2.0.0"));
    }

    #[test]
    fn test_wide_range_suppresses_major_bump() {
        // >=1.0.0 admits any later version, so the flag stays down
        assert!(!is_update_available(">=1.0.0", "3.0.0"));
    }

    #[test]
    fn test_space_separated_range() {
        assert!(!is_update_available(">=1.0.0 <2.0.0", "1.9.0"));
        assert!(is_update_available(">=1.0.0 <2.0.0", "2.1.0"));
    }

    #[test]
    fn test_exact_pin_is_not_a_caret_range() {
        // a bare version pins exactly, so a patch bump is still an update
        assert!(is_update_available("1.0.0", "1.0.1"));
    }

    #[test]
    fn test_operator_detached_from_version() {
        // >= 1.0.0 admits 2.0.0, so the flag stays down
        assert!(!is_update_available(">= 1.0.0", "2.0.0"));
    }

    #[test]
    fn test_non_semver_current_is_never_updatable() {
        assert!(!is_update_available("git:main", "1.0.0"));
        assert!(!is_update_available("any", "1.0.0"));
        assert!(!is_update_available("", "1.0.0"));
    }

    #[test]
    fn test_non_semver_latest_is_never_updatable() {
        assert!(!is_update_available("1.0.0", "N/A"));
        assert!(!is_update_available("1.0.0", "latest"));
    }

    #[test]
    fn test_two_part_version_is_rejected() {
        assert!(!is_update_available("1.2", "1.3.0"));
        assert!(!is_update_available("1.2.0", "1.3"));
    }

    #[test]
    fn test_classify_major() {
        assert_eq!(classify_update("1.2.3", "2.0.0"), Some(UpdateKind::Major));
    }

    #[test]
    fn test_classify_minor() {
        assert_eq!(classify_update("1.2.3", "1.3.0"), Some(UpdateKind::Minor));
    }

    #[test]
    fn test_classify_patch() {
        assert_eq!(classify_update("1.2.3", "1.2.4"), Some(UpdateKind::Patch));
    }

    #[test]
    fn test_classify_equal_is_none() {
        assert_eq!(classify_update("1.2.3", "1.2.3"), None);
    }

    #[test]
    fn test_classify_major_wins_over_minor_and_patch() {
        assert_eq!(classify_update("1.9.9", "2.0.1"), Some(UpdateKind::Major));
    }

    #[test]
    fn test_classify_strips_constraint_prefix() {
        assert_eq!(classify_update("^1.2.3", "2.0.0"), Some(UpdateKind::Major));
        assert_eq!(classify_update(">=1.2.3 <2.0.0", "1.3.0"), Some(UpdateKind::Minor));
    }

    #[test]
    fn test_classify_invalid_input_is_none() {
        assert_eq!(classify_update("any", "1.0.0"), None);
        assert_eq!(classify_update("1.0.0", "N/A"), None);
    }

    #[test]
    fn test_update_kind_display() {
        assert_eq!(format!("{}", UpdateKind::Major), "major");
        assert_eq!(format!("{}", UpdateKind::Minor), "minor");
        assert_eq!(format!("{}", UpdateKind::Patch), "patch");
    }

    #[test]
    fn test_strictly_greater_pairs_without_satisfying_range() {
        let pairs = [
            ("1.0.0", "1.0.1"),
            ("1.0.0", "1.1.0"),
            ("1.0.0", "2.0.0"),
            ("0.9.9", "1.0.0"),
        ];
        for (current, latest) in pairs {
            assert!(
                is_update_available(current, latest),
                "{current} -> {latest} should be updatable"
            );
        }
    }
}
