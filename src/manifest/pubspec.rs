//! pubspec.yaml extraction
//!
//! The SDK constraint is read with a line scan so a range like
//! `">=3.0.0 <4.0.0"` yields its first dotted triple; the dependency maps are
//! read from the parsed YAML value tree, matching on shape rather than
//! assuming structure.

use super::scan::scan_for_version;
use crate::domain::{DependencySpec, ANY_CONSTRAINT};
use serde_yaml::Value;

/// Package names belonging to the SDK itself, never checked against pub.dev
const RESERVED_PACKAGES: [&str; 2] = ["flutter", "flutter_test"];

/// Parses manifest text into a YAML value tree
pub fn parse_document(text: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Extracts the SDK version constraint from the `environment:` block
///
/// The scan stops at the first sibling key inside the block, so a manifest
/// declaring only `sdk:` yields None.
pub fn sdk_version_from_pubspec(text: &str) -> Option<String> {
    scan_for_version(text, "flutter:", Some("environment:"))
}

/// Extracts dependency specs from the parsed manifest
///
/// Reads the `dependencies` map and, when `include_dev` is set, the
/// `dev_dependencies` map, preserving each map's order with runtime entries
/// first. Reserved SDK packages are excluded. The constraint is the entry's
/// string value, the `version` field of a mapping value, or the sentinel
/// `any` for every other shape.
pub fn extract_dependencies(document: &Value, include_dev: bool) -> Vec<DependencySpec> {
    let mut specs = Vec::new();

    collect_from_map(document.get("dependencies"), &mut specs);
    if include_dev {
        collect_from_map(document.get("dev_dependencies"), &mut specs);
    }

    specs
}

fn collect_from_map(map: Option<&Value>, specs: &mut Vec<DependencySpec>) {
    let Some(Value::Mapping(entries)) = map else {
        return;
    };

    for (key, value) in entries {
        let Some(name) = key.as_str() else {
            continue;
        };
        if RESERVED_PACKAGES.contains(&name) {
            continue;
        }
        specs.push(DependencySpec::new(name, constraint_from_value(value)));
    }
}

/// Reads a constraint out of whatever shape the manifest entry has
fn constraint_from_value(value: &Value) -> String {
    match value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Mapping(_) => value
            .get("version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| ANY_CONSTRAINT.to_string()),
        _ => ANY_CONSTRAINT.to_string(),
    }
}
