use rust_xlsxwriter::{Chart, ChartType, Workbook};

use crate::error::{DashboardError, Result};
use crate::export::DASHBOARD_HEADER;
use crate::telemetry::TelemetryRecord;

pub const SHEET_NAME: &str = "Données";

pub const CHART_TITLE: &str = "Évolution Température & Humidité";

// Zero-based top-left cell of the embedded chart.
const CHART_ANCHOR: (u32, u16) = (1, 4);

const TIME_COLUMN: u16 = 1;
const TEMPERATURE_COLUMN: u16 = 2;
const HUMIDITY_COLUMN: u16 = 3;

/// Single-sheet workbook with the dashboard columns and a line chart of
/// temperature and humidity over the Date/Heure column.
pub fn export_spreadsheet(records: &[TelemetryRecord]) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(DashboardError::EmptyExport);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in DASHBOARD_HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, record.device_label())?;
        worksheet.write_string(row, TIME_COLUMN, record.raw_time.as_str())?;
        worksheet.write_number(row, TEMPERATURE_COLUMN, record.temperature_celsius)?;
        worksheet.write_number(row, HUMIDITY_COLUMN, record.humidity_percent)?;
    }

    let last_row = records.len() as u32;
    let mut chart = Chart::new(ChartType::Line);
    chart.title().set_name(CHART_TITLE);

    for (name, col) in [
        ("Température (C)", TEMPERATURE_COLUMN),
        ("Humidité (%)", HUMIDITY_COLUMN),
    ] {
        chart
            .add_series()
            .set_name(name)
            .set_categories((SHEET_NAME, 1, TIME_COLUMN, last_row, TIME_COLUMN))
            .set_values((SHEET_NAME, 1, col, last_row, col));
    }

    worksheet.insert_chart(CHART_ANCHOR.0, CHART_ANCHOR.1, &chart)?;

    Ok(workbook.save_to_buffer()?)
}
