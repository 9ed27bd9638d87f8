//! Slack notification
//!
//! Builds a Block Kit message out of the collected reports and posts it via
//! `chat.postMessage`. The spreadsheet is then attached to the message
//! thread with the external-upload flow: `files.getUploadURLExternal`, a raw
//! upload to the returned URL, and `files.completeUploadExternal`. The
//! attachment is best effort; its failure never fails the publish.

use crate::api::{HttpClient, HttpFailure};
use crate::domain::RepositoryReport;
use crate::error::PublishError;
use crate::report::spreadsheet::{build_workbook, report_filename};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};

const SLACK_API_URL: &str = "https://slack.com/api";

/// Content type of an XLSX attachment
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// How many outdated packages a repository section lists before truncating
const SECTION_PACKAGE_LIMIT: usize = 5;

/// Slack Web API publisher
pub struct SlackNotifier {
    client: HttpClient,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadUrlResponse {
    ok: bool,
    upload_url: Option<String>,
    file_id: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompleteUploadResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackNotifier {
    /// Create a publisher for the given bot token
    pub fn new(client: HttpClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    /// Post the summary message and attach the spreadsheet to its thread
    pub async fn publish(
        &self,
        channel: &str,
        reports: &[RepositoryReport],
        latest_sdk: &str,
    ) -> Result<(), PublishError> {
        let thread_ts = self.post_message(channel, reports, latest_sdk).await?;

        if let Err(e) = self.upload_report(channel, thread_ts.as_deref(), reports).await {
            eprintln!("warning: {}", e);
        }

        Ok(())
    }

    async fn post_message(
        &self,
        channel: &str,
        reports: &[RepositoryReport],
        latest_sdk: &str,
    ) -> Result<Option<String>, PublishError> {
        let has_updates = reports.iter().any(|r| r.has_updates());
        let text = if has_updates {
            "Flutter dependency updates available"
        } else {
            "Flutter dependency check results"
        };

        let body = json!({
            "channel": channel,
            "text": text,
            "blocks": build_message_blocks(reports, latest_sdk),
            "username": "Flutter Version Bot",
            "icon_emoji": ":flutter:",
        });

        let response: PostMessageResponse = self
            .call_api("chat.postMessage", &body)
            .await
            .map_err(|e| PublishError::api("chat.postMessage", e.to_string()))?;
        if !response.ok {
            return Err(PublishError::api(
                "chat.postMessage",
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(response.ts)
    }

    async fn upload_report(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        reports: &[RepositoryReport],
    ) -> Result<(), PublishError> {
        let bytes =
            build_workbook(reports).map_err(|e| PublishError::upload(e.to_string()))?;
        let filename = report_filename(&Local::now());

        let url = format!(
            "{}/files.getUploadURLExternal?filename={}&length={}",
            SLACK_API_URL,
            filename,
            bytes.len()
        );
        let bearer = format!("Bearer {}", self.token);
        let response: UploadUrlResponse = self
            .client
            .get_json(&url, &[("Authorization", bearer.as_str())])
            .await
            .map_err(|e| PublishError::upload(e.to_string()))?;
        if !response.ok {
            return Err(PublishError::upload(
                response.error.unwrap_or_else(|| "failed to get upload URL".to_string()),
            ));
        }
        let (upload_url, file_id) = match (response.upload_url, response.file_id) {
            (Some(url), Some(id)) => (url, id),
            _ => return Err(PublishError::upload("upload URL response incomplete")),
        };

        self.client
            .put_bytes(&upload_url, XLSX_CONTENT_TYPE, bytes)
            .await
            .map_err(|e| PublishError::upload(e.to_string()))?;

        let mut body = json!({
            "files": [{"id": file_id, "title": "Flutter dependency check results"}],
            "channel_id": channel,
            "initial_comment": "Full check results attached as a spreadsheet.",
        });
        if let Some(ts) = thread_ts {
            body["thread_ts"] = json!(ts);
        }

        let response: CompleteUploadResponse = self
            .call_api("files.completeUploadExternal", &body)
            .await
            .map_err(|e| PublishError::upload(e.to_string()))?;
        if !response.ok {
            return Err(PublishError::upload(
                response.error.unwrap_or_else(|| "failed to complete upload".to_string()),
            ));
        }

        Ok(())
    }

    async fn call_api<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
    ) -> Result<T, HttpFailure> {
        let url = format!("{}/{}", SLACK_API_URL, method);
        let bearer = format!("Bearer {}", self.token);
        self.client
            .post_json(&url, &[("Authorization", bearer.as_str())], body)
            .await
    }
}

/// Build the Block Kit blocks for the summary message
pub fn build_message_blocks(reports: &[RepositoryReport], latest_sdk: &str) -> Vec<Value> {
    let succeeded = reports.iter().filter(|r| !r.is_failure()).count();
    let failed = reports.len() - succeeded;
    let has_updates = reports.iter().any(|r| r.has_updates());

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": if has_updates {
                    "🔄 Flutter dependency updates"
                } else {
                    "✅ Flutter dependency check"
                },
            }
        }),
        json!({
            "type": "section",
            "fields": [
                {"type": "mrkdwn", "text": format!("*Repositories*\n{}", reports.len())},
                {"type": "mrkdwn", "text": format!("*Succeeded*\n{}", succeeded)},
                {"type": "mrkdwn", "text": format!("*Failed*\n{}", failed)},
                {"type": "mrkdwn", "text": format!("*Latest Flutter SDK*\n{}", latest_sdk)},
            ]
        }),
    ];

    let sdk_lines: Vec<String> = reports
        .iter()
        .filter(|r| !r.is_failure())
        .map(|r| {
            if r.sdk.update_available {
                format!("• {}: {} → {} 🔄", r.repository.name, r.sdk.current, r.sdk.latest)
            } else {
                format!("• {}: {} ✅", r.repository.name, r.sdk.current)
            }
        })
        .collect();
    if !sdk_lines.is_empty() {
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Flutter SDK versions*\n{}", sdk_lines.join("\n")),
            }
        }));
    }

    for report in reports {
        if let Some(error) = &report.error {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*❌ {}*\nError: {}", report.repository.name, error),
                }
            }));
            continue;
        }

        let outdated = report.outdated_packages();
        if outdated.is_empty() {
            continue;
        }

        let mut lines: Vec<String> = outdated
            .iter()
            .take(SECTION_PACKAGE_LIMIT)
            .map(|p| format!("• {}: {} → {}", p.name, p.current, p.latest))
            .collect();
        if outdated.len() > SECTION_PACKAGE_LIMIT {
            lines.push(format!("… {} more", outdated.len() - SECTION_PACKAGE_LIMIT));
        }
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*{}*\nOutdated packages ({}):\n{}",
                    report.repository.name,
                    outdated.len(),
                    lines.join("\n")
                ),
            }
        }));
    }

    blocks.push(json!({
        "type": "context",
        "elements": [{
            "type": "mrkdwn",
            "text": format!("Last checked: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        }]
    }));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageStatus, RepositoryRef, SdkStatus};

    fn repo(name: &str) -> RepositoryRef {
        RepositoryRef::new(name, format!("https://github.com/acme/{name}"))
    }

    fn outdated(name: &str) -> PackageStatus {
        PackageStatus::new(name, "^1.0.0", "2.0.0", true)
    }

    #[test]
    fn test_blocks_start_with_header_and_summary() {
        let reports = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.24.0", "3.24.0"),
            vec![],
        )];
        let blocks = build_message_blocks(&reports, "3.24.0");
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[1]["type"], "section");
        let fields = blocks[1]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert!(fields[0]["text"].as_str().unwrap().contains("1"));
    }

    #[test]
    fn test_header_reflects_update_state() {
        let clean = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.24.0", "3.24.0"),
            vec![],
        )];
        let blocks = build_message_blocks(&clean, "3.24.0");
        assert!(blocks[0]["text"]["text"].as_str().unwrap().contains("check"));

        let with_updates = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.22.0", "3.24.0"),
            vec![],
        )];
        let blocks = build_message_blocks(&with_updates, "3.24.0");
        assert!(blocks[0]["text"]["text"].as_str().unwrap().contains("updates"));
    }

    #[test]
    fn test_error_reports_get_their_own_section() {
        let reports = vec![RepositoryReport::failure(repo("broken"), "3.24.0", "boom")];
        let blocks = build_message_blocks(&reports, "3.24.0");
        let rendered = serde_json::to_string(&blocks).unwrap();
        assert!(rendered.contains("broken"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn test_package_sections_are_capped() {
        let packages: Vec<PackageStatus> =
            (0..8).map(|i| outdated(&format!("pkg{i}"))).collect();
        let reports = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.24.0", "3.24.0"),
            packages,
        )];
        let blocks = build_message_blocks(&reports, "3.24.0");
        let rendered = serde_json::to_string(&blocks).unwrap();
        assert!(rendered.contains("pkg4"));
        assert!(!rendered.contains("pkg5"));
        assert!(rendered.contains("… 3 more"));
        assert!(rendered.contains("Outdated packages (8)"));
    }

    #[test]
    fn test_up_to_date_repository_gets_no_detail_section() {
        let reports = vec![RepositoryReport::success(
            repo("app"),
            SdkStatus::new("3.24.0", "3.24.0"),
            vec![PackageStatus::new("dio", "^5.4.0", "5.4.0", false)],
        )];
        let blocks = build_message_blocks(&reports, "3.24.0");
        // header, summary fields, SDK list, context
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn test_last_block_is_context_timestamp() {
        let blocks = build_message_blocks(&[], "3.24.0");
        let last = blocks.last().unwrap();
        assert_eq!(last["type"], "context");
        assert!(last["elements"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Last checked:"));
    }
}
