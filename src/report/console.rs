//! Console summary of the collected reports

use crate::domain::RepositoryReport;
use colored::Colorize;
use std::fmt::Write;

/// Render a human-readable summary of the run
pub fn render_summary(reports: &[RepositoryReport], latest_sdk: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Latest Flutter SDK: {}", latest_sdk.bold());
    let _ = writeln!(out);

    for report in reports {
        if let Some(error) = &report.error {
            let _ = writeln!(out, "{} {}", "✗".red(), report.repository.name.bold());
            let _ = writeln!(out, "    {}", error.red());
            continue;
        }

        let sdk_line = if report.sdk.update_available {
            format!("{} → {}", report.sdk.current, report.sdk.latest).yellow()
        } else {
            report.sdk.current.as_str().green()
        };
        let _ = writeln!(
            out,
            "{} {}  Flutter {}",
            "✓".green(),
            report.repository.name.bold(),
            sdk_line
        );

        let outdated = report.outdated_packages();
        if outdated.is_empty() {
            let _ = writeln!(out, "    all packages up to date");
        } else {
            let _ = writeln!(out, "    {} outdated:", outdated.len());
            for package in outdated {
                let _ = writeln!(
                    out,
                    "      {}: {} → {}",
                    package.name,
                    package.current,
                    package.latest.yellow()
                );
            }
        }
    }

    let succeeded = reports.iter().filter(|r| !r.is_failure()).count();
    let failed = reports.len() - succeeded;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} repositories checked, {} succeeded, {} failed",
        reports.len(),
        succeeded,
        failed
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageStatus, RepositoryRef, SdkStatus};

    fn repo(name: &str) -> RepositoryRef {
        RepositoryRef::new(name, format!("https://github.com/acme/{name}"))
    }

    #[test]
    fn test_summary_lists_outdated_packages() {
        let reports = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.22.0", "3.24.0"),
            vec![
                PackageStatus::new("provider", "^6.0.5", "6.1.2", true),
                PackageStatus::new("dio", "^5.4.0", "5.4.0", false),
            ],
        )];
        let summary = render_summary(&reports, "3.24.0");
        assert!(summary.contains("app"));
        assert!(summary.contains("provider"));
        assert!(summary.contains("1 outdated"));
        assert!(!summary.contains("dio: "));
    }

    #[test]
    fn test_summary_shows_errors() {
        let reports = vec![RepositoryReport::failure(
            repo("broken"),
            "3.24.0",
            "pubspec.yaml not found in repository",
        )];
        let summary = render_summary(&reports, "3.24.0");
        assert!(summary.contains("broken"));
        assert!(summary.contains("pubspec.yaml not found"));
        assert!(summary.contains("1 repositories checked, 0 succeeded, 1 failed"));
    }

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            RepositoryReport::success(repo("one"), SdkStatus::new("3.24.0", "3.24.0"), vec![]),
            RepositoryReport::failure(repo("two"), "3.24.0", "boom"),
        ];
        let summary = render_summary(&reports, "3.24.0");
        assert!(summary.contains("2 repositories checked, 1 succeeded, 1 failed"));
    }
}
