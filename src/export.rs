//! File exports of telemetry records.
//!
//! Every exporter is a pure function of the records handed to it and
//! refuses an empty slice with [`DashboardError::EmptyExport`]. Writing
//! the bytes somewhere is left to the caller.

mod delimited;
mod workbook;

pub use delimited::*;
pub use workbook::*;

use chrono::NaiveDate;

use crate::error::Result;
use crate::telemetry::TelemetryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `;`-separated with device column, for French-locale Excel.
    Semicolon,
    /// `,`-separated history layout without device column.
    History,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Semicolon | ExportFormat::History => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Semicolon | ExportFormat::History => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn encode(&self, records: &[TelemetryRecord]) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Semicolon => export_delimited(records, b';'),
            ExportFormat::History => export_history_csv(records),
            ExportFormat::Xlsx => export_spreadsheet(records),
        }
    }
}

/// `donnees_DD-MM-YYYY.<ext>`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("donnees_{}.{}", date.format("%d-%m-%Y"), format.extension())
}
