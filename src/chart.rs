//! Chart rendering capability.
//!
//! The dashboard tracks two metrics, each drawn as its own line chart. A
//! [`ChartSink`] receives the full label axis and data series on every
//! render; nothing is appended incrementally.

use crate::telemetry::{TelemetryCache, TelemetryRecord};

/// Number of most recent cache entries drawn on the live dashboard.
pub const CHART_WINDOW: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Température (°C)",
            Metric::Humidity => "Humidité (%)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
        }
    }

    pub fn value_of(&self, record: &TelemetryRecord) -> f64 {
        match self {
            Metric::Temperature => record.temperature_celsius,
            Metric::Humidity => record.humidity_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub metric: Metric,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_records(metric: Metric, records: &[TelemetryRecord]) -> Self {
        Self {
            metric,
            labels: records.iter().map(|r| r.raw_time.clone()).collect(),
            values: records.iter().map(|r| metric.value_of(r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(min, max, last)` of the series, or `None` when empty.
    pub fn stats(&self) -> Option<(f64, f64, f64)> {
        let last = *self.values.last()?;
        let (min, max) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some((min, max, last))
    }
}

/// Something that can draw a series, replacing whatever it showed before.
pub trait ChartSink {
    fn render(&mut self, series: &ChartSeries);
}

/// Renders both metrics for `records`.
pub fn render_records<S: ChartSink + ?Sized>(sink: &mut S, records: &[TelemetryRecord]) {
    for metric in [Metric::Temperature, Metric::Humidity] {
        sink.render(&ChartSeries::from_records(metric, records));
    }
}

/// Renders the last `window` entries of the cache; the cache itself keeps everything.
pub fn render_window<S: ChartSink + ?Sized>(sink: &mut S, cache: &TelemetryCache, window: usize) {
    render_records(sink, cache.window(window));
}
