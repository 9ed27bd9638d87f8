//! pubwatch - Flutter dependency checker
//!
//! Checks every configured repository for outdated Flutter SDK pins and
//! pub.dev dependencies, then publishes the results to Slack with an
//! attached spreadsheet.

use clap::Parser;
use pubwatch::api::{FlutterReleaseFeed, GitHubHost, HttpClient, PubDevRegistry, SdkReleaseFeed};
use pubwatch::checker::RepositoryChecker;
use pubwatch::cli::CliArgs;
use pubwatch::config::Config;
use pubwatch::progress::Progress;
use pubwatch::report::{render_summary, SlackNotifier};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Run-fatal territory: configuration, credentials, and the baseline SDK
    // version must all be available before any repository is checked.
    let config = Config::assemble(&args)?;
    let client = HttpClient::new()?;

    let mut progress = Progress::new(!args.quiet);
    progress.spinner("Resolving latest Flutter SDK version...");
    let feed = FlutterReleaseFeed::new(client.clone());
    let latest_sdk = feed.latest_stable().await?;
    progress.finish_and_clear();

    if args.verbose {
        eprintln!("pubwatch v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Latest Flutter SDK: {}", latest_sdk);
        eprintln!("Repositories: {}", config.repositories.len());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let host = GitHubHost::new(client.clone(), config.github_token.clone());
    let registry = PubDevRegistry::new(client.clone());
    let checker =
        RepositoryChecker::new(&host, &registry, latest_sdk.as_str(), config.include_dev_deps);

    let reports = checker.run_batch(&config.repositories, &mut progress).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if !args.quiet {
        print!("{}", render_summary(&reports, &latest_sdk));
    }

    if !args.dry_run {
        let notifier = SlackNotifier::new(client, config.slack_token.clone());
        notifier
            .publish(&config.slack_channel, &reports, &latest_sdk)
            .await?;
        if args.verbose {
            eprintln!("Notification posted to {}", config.slack_channel);
        }
    }

    // Partial success still publishes, but the exit code flags it
    let has_failures = reports.iter().any(|r| r.is_failure());
    if has_failures {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
