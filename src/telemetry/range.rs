use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

use crate::error::{DashboardError, Result};
use crate::telemetry::{RAW_TIME_FORMAT, TelemetryRecord, record::localize};

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", RAW_TIME_FORMAT];

/// Records with `start <= measured_at <= end`, as a sub-slice of `records`.
///
/// `records` must be sorted by `measured_at`, which [`TelemetryCache`](crate::telemetry::TelemetryCache)
/// guarantees. An empty slice means "no data in range"; `start > end` is an error.
pub fn filter_range<'a>(
    records: &'a [TelemetryRecord],
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> Result<&'a [TelemetryRecord]> {
    if start > end {
        return Err(DashboardError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }

    let lo = records.partition_point(|r| r.measured_at < *start);
    let hi = records.partition_point(|r| r.measured_at <= *end);

    Ok(&records[lo..hi])
}

/// Parses a range bound typed by the user (`2025-07-19T10:30`, with optional
/// seconds, or the `DD/MM/YYYY HH:MM:SS` display form).
pub fn parse_range_bound(input: &str, timezone: Tz) -> Result<DateTime<Tz>> {
    let input = input.trim();
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| DashboardError::InvalidRange(format!("unrecognized date/time: {input:?}")))?;

    localize(naive, timezone)
        .ok_or_else(|| DashboardError::InvalidRange(format!("nonexistent local time: {input}")))
}

/// Parses both bounds; either one missing is an error, as is `start > end`.
pub fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
    timezone: Tz,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let (Some(start), Some(end)) = (
        start.filter(|s| !s.trim().is_empty()),
        end.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(DashboardError::InvalidRange(
            "select both a start and an end date/time".to_string(),
        ));
    };

    let start = parse_range_bound(start, timezone)?;
    let end = parse_range_bound(end, timezone)?;
    if start > end {
        return Err(DashboardError::InvalidRange(
            "start must be before end".to_string(),
        ));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{RawRecord, RawValue, TelemetryCache};
    use chrono::Duration;
    use chrono_tz::Europe::Paris;

    fn cache_of(entries: &[(&str, &str, &str)]) -> TelemetryCache {
        let raws: Vec<RawRecord> = entries
            .iter()
            .map(|(time, temperature, humidity)| RawRecord {
                device_id: None,
                time: Some(RawValue::Text(time.to_string())),
                temperature: Some(RawValue::Text(temperature.to_string())),
                humidity: Some(RawValue::Text(humidity.to_string())),
            })
            .collect();
        let mut cache = TelemetryCache::new();
        cache.refresh(&raws, Paris);
        cache
    }

    #[test]
    fn test_filter_returns_records_after_half_past() {
        let cache = cache_of(&[
            ("19/07/2025 10:00:00", "18.5", "60"),
            ("19/07/2025 11:00:00", "19.2", "58"),
        ]);
        let start = parse_range_bound("2025-07-19T10:30", Paris).unwrap();
        let end = parse_range_bound("2025-07-19T12:00", Paris).unwrap();

        let filtered = cache.filter(&start, &end).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].raw_time, "19/07/2025 11:00:00");
        assert_eq!(filtered[0].temperature_celsius, 19.2);
        assert_eq!(filtered[0].humidity_percent, 58.0);
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let cache = cache_of(&[
            ("19/07/2025 09:59:59", "1", "1"),
            ("19/07/2025 10:00:00", "2", "2"),
            ("19/07/2025 10:30:00", "3", "3"),
            ("19/07/2025 11:00:00", "4", "4"),
            ("19/07/2025 11:00:01", "5", "5"),
        ]);
        let start = parse_range_bound("19/07/2025 10:00:00", Paris).unwrap();
        let end = parse_range_bound("19/07/2025 11:00:00", Paris).unwrap();

        let temps: Vec<f64> = cache
            .filter(&start, &end)
            .unwrap()
            .iter()
            .map(|r| r.temperature_celsius)
            .collect();
        assert_eq!(temps, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_filter_matches_brute_force() {
        let entries: Vec<(String, String, String)> = (0..48)
            .map(|i| (format!("19/07/2025 {:02}:{:02}:00", i / 2, (i % 2) * 30), i.to_string(), "50".to_string()))
            .collect();
        let borrowed: Vec<(&str, &str, &str)> =
            entries.iter().map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str())).collect();
        let cache = cache_of(&borrowed);
        let base = parse_range_bound("2025-07-19T00:00", Paris).unwrap();

        for (from, to) in [(0, 0), (0, 60), (45, 200), (15, 16), (600, 1440), (1500, 1600)] {
            let start = base + Duration::minutes(from);
            let end = base + Duration::minutes(to);
            let expected: Vec<&TelemetryRecord> = cache
                .records()
                .iter()
                .filter(|r| r.measured_at >= start && r.measured_at <= end)
                .collect();
            let actual: Vec<&TelemetryRecord> = cache.filter(&start, &end).unwrap().iter().collect();
            assert_eq!(actual, expected, "{from}..{to}");
        }
    }

    #[test]
    fn test_filter_empty_is_not_an_error() {
        let cache = cache_of(&[("19/07/2025 10:00:00", "18.5", "60")]);
        let start = parse_range_bound("2025-07-20T00:00", Paris).unwrap();
        let end = parse_range_bound("2025-07-21T00:00", Paris).unwrap();

        assert!(cache.filter(&start, &end).unwrap().is_empty());
    }

    #[test]
    fn test_filter_inverted_range_fails_without_touching_cache() {
        let cache = cache_of(&[("19/07/2025 10:00:00", "18.5", "60")]);
        let start = parse_range_bound("2025-07-19T12:00", Paris).unwrap();
        let end = parse_range_bound("2025-07-19T10:30", Paris).unwrap();

        assert!(matches!(cache.filter(&start, &end), Err(DashboardError::InvalidRange(_))));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_parse_range_requires_both_bounds() {
        assert!(matches!(
            parse_range(Some("2025-07-19T10:00"), None, Paris),
            Err(DashboardError::InvalidRange(_))
        ));
        assert!(parse_range(Some(""), Some("2025-07-19T10:00"), Paris).is_err());
        assert!(parse_range(Some("2025-07-19T12:00"), Some("2025-07-19T10:00"), Paris).is_err());
        assert!(parse_range(Some("tomorrow"), Some("2025-07-19T10:00"), Paris).is_err());

        let (start, end) = parse_range(Some("2025-07-19T10:00"), Some("2025-07-19T10:00:30"), Paris).unwrap();
        assert!(start < end);
    }
}
