use csv::{Terminator, WriterBuilder};

use crate::error::{DashboardError, Result};
use crate::telemetry::TelemetryRecord;

pub const DASHBOARD_HEADER: [&str; 4] =
    ["Identifiant", "Date/Heure", "Temperature (C)", "Humidite (%)"];

pub const HISTORY_HEADER: [&str; 3] = ["Date/Heure", "Température (°C)", "Humidité (%)"];

/// Header plus one row per record (device, time, temperature, humidity),
/// fields joined by `separator`, every row `\n`-terminated.
pub fn export_delimited(records: &[TelemetryRecord], separator: u8) -> Result<Vec<u8>> {
    write_rows(separator, &DASHBOARD_HEADER, records, |r| {
        vec![
            r.device_label().to_string(),
            r.raw_time.clone(),
            r.temperature_celsius.to_string(),
            r.humidity_percent.to_string(),
        ]
    })
}

pub fn export_history_csv(records: &[TelemetryRecord]) -> Result<Vec<u8>> {
    write_rows(b',', &HISTORY_HEADER, records, |r| {
        vec![
            r.raw_time.clone(),
            r.temperature_celsius.to_string(),
            r.humidity_percent.to_string(),
        ]
    })
}

fn write_rows<F>(
    separator: u8,
    header: &[&str],
    records: &[TelemetryRecord],
    row: F,
) -> Result<Vec<u8>>
where
    F: Fn(&TelemetryRecord) -> Vec<String>,
{
    if records.is_empty() {
        return Err(DashboardError::EmptyExport);
    }

    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for record in records {
        writer.write_record(row(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::Csv(e.into_error().into()))
}
