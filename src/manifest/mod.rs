//! Extraction of SDK pins and dependency lists from repository files
//!
//! Two small grammars are handled here:
//! - the one-line `.fvmrc` style version-pin file
//! - the `environment:` block and dependency maps of `pubspec.yaml`

mod pin_file;
mod pubspec;
mod scan;

pub use pin_file::sdk_version_from_pin_file;
pub use pubspec::{extract_dependencies, parse_document, sdk_version_from_pubspec};
