use chrono::DateTime;
use chrono_tz::Tz;
use tracing::warn;

use crate::error::Result;
use crate::telemetry::{RawRecord, TelemetryRecord, filter_range};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub accepted: usize,
    pub skipped: usize,
}

/// Timestamp-ordered telemetry, replaced wholesale on every refresh.
///
/// Entries sharing an instant are all kept, in input order.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCache {
    records: Vec<TelemetryRecord>,
}

impl TelemetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut records: Vec<TelemetryRecord>) -> Self {
        sort_stable(&mut records);
        Self { records }
    }

    /// Normalizes `raw` and swaps it in. Malformed entries are logged and skipped.
    pub fn refresh(&mut self, raw: &[RawRecord], timezone: Tz) -> RefreshSummary {
        let mut records = Vec::with_capacity(raw.len());
        let mut skipped = 0;

        for (index, entry) in raw.iter().enumerate() {
            match TelemetryRecord::from_raw(entry, timezone) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(index, time = ?entry.time, "skipping telemetry entry: {err}");
                    skipped += 1;
                }
            }
        }

        sort_stable(&mut records);
        let accepted = records.len();
        self.records = records;

        RefreshSummary { accepted, skipped }
    }

    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.last()
    }

    /// The most recent `size` entries, oldest first.
    pub fn window(&self, size: usize) -> &[TelemetryRecord] {
        let start = self.records.len().saturating_sub(size);
        &self.records[start..]
    }

    pub fn filter(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> Result<&[TelemetryRecord]> {
        filter_range(&self.records, start, end)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn sort_stable(records: &mut [TelemetryRecord]) {
    // slice::sort_by is stable
    records.sort_by(|a, b| a.measured_at.cmp(&b.measured_at));
}
