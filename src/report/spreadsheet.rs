//! XLSX report builder
//!
//! Pure transform of the collected reports into workbook bytes. One row per
//! failed repository, one SDK row per successful repository, one row per
//! checked package. Font color marks severity: errors red, SDK updates
//! orange, major package updates red, minor and patch updates blue.

use crate::domain::RepositoryReport;
use crate::version::{self, UpdateKind};
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

const HEADER_FILL: Color = Color::RGB(0xE0E0E0);
const ERROR_COLOR: Color = Color::RGB(0xFF0000);
const SDK_UPDATE_COLOR: Color = Color::RGB(0xFF6600);
const MINOR_UPDATE_COLOR: Color = Color::RGB(0x0066CC);

const COLUMNS: [(&str, f64); 5] = [
    ("Repository", 20.0),
    ("Package", 30.0),
    ("Current version", 20.0),
    ("Latest version", 20.0),
    ("Flutter SDK", 25.0),
];

/// Build the attachment file name for a run timestamp
pub fn report_filename(now: &DateTime<Local>) -> String {
    format!("flutter-dependency-check-{}.xlsx", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Build the workbook and return its bytes
pub fn build_workbook(reports: &[RepositoryReport]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Dependency check")?;

    let header_format = Format::new().set_bold().set_background_color(HEADER_FILL);
    let error_format = Format::new().set_font_color(ERROR_COLOR);
    let sdk_update_format = Format::new().set_font_color(SDK_UPDATE_COLOR);
    let major_format = Format::new().set_font_color(ERROR_COLOR);
    let minor_format = Format::new().set_font_color(MINOR_UPDATE_COLOR);

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    let mut row: u32 = 1;
    for report in reports {
        if let Some(error) = &report.error {
            let cells = [report.repository.name.as_str(), "Error", error, "", ""];
            write_row(worksheet, row, &cells, Some(&error_format))?;
            row += 1;
            continue;
        }

        // SDK row is always written, update or not
        let sdk_cell = if report.sdk.update_available {
            format!("{} → {}", report.sdk.current, report.sdk.latest)
        } else {
            report.sdk.current.clone()
        };
        let cells = [
            report.repository.name.as_str(),
            "Flutter SDK",
            report.sdk.current.as_str(),
            report.sdk.latest.as_str(),
            sdk_cell.as_str(),
        ];
        let format = report.sdk.update_available.then_some(&sdk_update_format);
        write_row(worksheet, row, &cells, format)?;
        row += 1;

        for package in &report.packages {
            let cells = [
                report.repository.name.as_str(),
                package.name.as_str(),
                package.current.as_str(),
                package.latest.as_str(),
                "",
            ];
            let format = if package.update_available {
                match version::classify_update(&package.current, &package.latest) {
                    Some(UpdateKind::Major) => Some(&major_format),
                    _ => Some(&minor_format),
                }
            } else {
                None
            };
            write_row(worksheet, row, &cells, format)?;
            row += 1;
        }
    }

    workbook.save_to_buffer()
}

fn write_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    cells: &[&str; 5],
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    for (col, text) in cells.iter().enumerate() {
        match format {
            Some(format) => {
                worksheet.write_string_with_format(row, col as u16, *text, format)?;
            }
            None => {
                worksheet.write_string(row, col as u16, *text)?;
            }
        }
    }
    Ok(())
}
