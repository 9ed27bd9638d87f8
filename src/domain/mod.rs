//! Core domain models for pubwatch
//!
//! This module contains the fundamental types used throughout the application:
//! - Repository references provided by configuration
//! - Dependency specifications extracted from pubspec manifests
//! - Per-package and per-repository check results

mod dependency;
mod report;
mod repository;

pub use dependency::{DependencySpec, ANY_CONSTRAINT};
pub use report::{PackageStatus, RepositoryReport, SdkStatus};
pub use repository::RepositoryRef;
