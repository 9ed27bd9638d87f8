//! Version-pin file extraction
//!
//! The pin file (`.fvmrc`) names one fixed Flutter SDK version for local
//! tooling, either bare or quoted: `flutter: "3.24.0"` or `flutter: 3.24.0`.

use super::scan::scan_for_version;

/// Extracts the pinned SDK version from pin-file content
///
/// Tolerant of malformed input; returns None when no line carries a version.
pub fn sdk_version_from_pin_file(text: &str) -> Option<String> {
    scan_for_version(text, "flutter:", None)
}
