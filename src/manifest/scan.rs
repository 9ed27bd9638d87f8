//! Line scanning shared by the pin-file and pubspec extractors

use regex::Regex;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").unwrap());
static MAPPING_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\w+:").unwrap());

/// Pulls the first dotted version triple out of a key's value
fn version_from_value(value: &str) -> Option<String> {
    let cleaned = value.trim().trim_matches(['\'', '"']);
    VERSION_RE
        .captures(cleaned)
        .map(|caps| caps[1].to_string())
}

/// Scans text line by line for `key` and returns the first version found
///
/// With `block` set, only lines inside that top-level mapping block are
/// considered: the scan arms on a line equal to the block key after trimming,
/// and disarms for good when any other mapping key appears inside the block.
/// Lines whose value carries no dotted triple are passed over.
pub(crate) fn scan_for_version(text: &str, key: &str, block: Option<&str>) -> Option<String> {
    let mut in_block = block.is_none();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(block_key) = block {
            if trimmed == block_key {
                in_block = true;
                continue;
            }
            if !in_block {
                continue;
            }
        }

        if let Some(value) = trimmed.strip_prefix(key) {
            if let Some(version) = version_from_value(value) {
                return Some(version);
            }
        } else if block.is_some() && MAPPING_KEY_RE.is_match(line) && !line.contains(key) {
            break;
        }
    }

    None
}
