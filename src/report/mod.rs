//! Report formatting and publishing
//!
//! This module provides:
//! - Colored console summary of the collected reports
//! - XLSX spreadsheet builder
//! - Slack message builder and Web API publisher

mod console;
mod slack;
mod spreadsheet;

pub use console::render_summary;
pub use slack::{build_message_blocks, SlackNotifier};
pub use spreadsheet::{build_workbook, report_filename};
