use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone as _};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DashboardError, Result};

/// Locale-fixed display format of `time` in `/data` entries.
pub const RAW_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A field as the server sends it: JSON number or string.
///
/// Integers are kept exact so large device ids print unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Unsigned(u64),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawValue::Integer(n) => *n as f64,
            RawValue::Unsigned(n) => *n as f64,
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse().ok()?,
            RawValue::Other(_) => return None,
        };

        value.is_finite().then_some(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(n) => write!(f, "{n}"),
            RawValue::Unsigned(n) => write!(f, "{n}"),
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Other(v) => write!(f, "{v}"),
        }
    }
}

/// One entry of `GET /data`, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub device_id: Option<RawValue>,

    #[serde(default)]
    pub time: Option<RawValue>,

    #[serde(default)]
    pub temperature: Option<RawValue>,

    #[serde(default)]
    pub humidity: Option<RawValue>,
}

impl RawRecord {
    /// Reads one array element. Anything that is not an object becomes an
    /// empty record, which normalization then rejects on its own.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|err| {
            debug!("telemetry entry is not an object: {err}");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    pub device_id: Option<String>,

    pub raw_time: String,

    pub measured_at: DateTime<Tz>,

    pub temperature_celsius: f64,

    pub humidity_percent: f64,
}

impl TelemetryRecord {
    pub fn from_raw(raw: &RawRecord, timezone: Tz) -> Result<Self> {
        let raw_time = match &raw.time {
            Some(RawValue::Text(time)) => time.as_str(),
            Some(other) => {
                return Err(DashboardError::MalformedRecord(format!("time is not text: {other}")));
            }
            None => return Err(DashboardError::MalformedRecord("missing time".to_string())),
        };
        let measured_at = parse_raw_time(raw_time, timezone)?;

        let temperature_celsius = parse_reading("temperature", raw.temperature.as_ref())?;
        let humidity_percent = parse_reading("humidity", raw.humidity.as_ref())?;

        Ok(Self {
            device_id: raw.device_id.as_ref().map(ToString::to_string),
            raw_time: raw_time.to_string(),
            measured_at,
            temperature_celsius,
            humidity_percent,
        })
    }

    pub fn device_label(&self) -> &str {
        self.device_id.as_deref().unwrap_or("")
    }
}

/// Parses `DD/MM/YYYY HH:MM:SS` as a wall-clock time in `timezone`.
///
/// The source carries no offset, so the instant is only as right as the
/// timezone the caller assumes. An ambiguous wall time (DST fold) resolves
/// to the earlier instant; a skipped one (DST gap) is malformed.
pub fn parse_raw_time(raw_time: &str, timezone: Tz) -> Result<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(raw_time.trim(), RAW_TIME_FORMAT)
        .map_err(|e| DashboardError::MalformedRecord(format!("bad time {raw_time:?}: {e}")))?;

    localize(naive, timezone)
        .ok_or_else(|| DashboardError::MalformedRecord(format!("nonexistent local time: {raw_time}")))
}

pub(crate) fn localize(naive: NaiveDateTime, timezone: Tz) -> Option<DateTime<Tz>> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

fn parse_reading(field: &str, value: Option<&RawValue>) -> Result<f64> {
    let value =
        value.ok_or_else(|| DashboardError::MalformedRecord(format!("missing {field}")))?;

    value
        .as_f64()
        .ok_or_else(|| DashboardError::MalformedRecord(format!("bad {field}: {value}")))
}
