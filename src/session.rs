use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::alert::{AlertNotice, AlertState, NoticeChange};
use crate::error::Result;
use crate::export::ExportFormat;
use crate::telemetry::{RawRecord, RefreshSummary, TelemetryCache};
use crate::weather::WeatherSummary;

/// Everything one dashboard view holds between ticks.
///
/// Telemetry ticks are numbered by [`begin_tick`](Self::begin_tick). A result
/// from a tick older than the last one applied is dropped, so a slow response
/// cannot overwrite newer data.
#[derive(Debug)]
pub struct DashboardSession {
    timezone: Tz,
    cache: TelemetryCache,
    notice: AlertNotice,
    weather: Option<WeatherSummary>,
    issued_generation: u64,
    applied_generation: u64,
}

impl DashboardSession {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            cache: TelemetryCache::new(),
            notice: AlertNotice::new(),
            weather: None,
            issued_generation: 0,
            applied_generation: 0,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn cache(&self) -> &TelemetryCache {
        &self.cache
    }

    pub fn notice(&self) -> &AlertNotice {
        &self.notice
    }

    pub fn weather(&self) -> Option<&WeatherSummary> {
        self.weather.as_ref()
    }

    pub fn begin_tick(&mut self) -> u64 {
        self.issued_generation += 1;
        self.issued_generation
    }

    /// Returns `None` when the response is stale and was ignored.
    pub fn apply_telemetry(&mut self, generation: u64, raw: &[RawRecord]) -> Option<RefreshSummary> {
        if generation <= self.applied_generation {
            debug!(generation, applied = self.applied_generation, "dropping stale telemetry");
            return None;
        }

        self.applied_generation = generation;
        Some(self.cache.refresh(raw, self.timezone))
    }

    pub fn apply_alert(&mut self, generation: u64, evaluation: Result<AlertState>) -> NoticeChange {
        if generation < self.applied_generation {
            debug!(generation, applied = self.applied_generation, "dropping stale alert check");
            return NoticeChange::Unchanged;
        }

        self.notice.apply(evaluation)
    }

    pub fn apply_weather(&mut self, summary: WeatherSummary) {
        self.weather = Some(summary);
    }

    /// Current-reading lines for the latest record.
    pub fn latest_panel(&self) -> Option<[String; 3]> {
        let latest = self.cache.latest()?;
        Some([
            format!("Température : {} °C", latest.temperature_celsius),
            format!("Humidité : {} %", latest.humidity_percent),
            format!("Heure : {}", latest.raw_time),
        ])
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.cache
            .records()
            .iter()
            .map(|r| {
                format!(
                    "Identifiant : {} - {} - Température : {} °C, Humidité : {} %",
                    r.device_label(),
                    r.raw_time,
                    r.temperature_celsius,
                    r.humidity_percent
                )
            })
            .collect()
    }

    /// Exports the whole cache.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        format.encode(self.cache.records())
    }

    pub fn export_range(
        &self,
        format: ExportFormat,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Vec<u8>> {
        format.encode(self.cache.filter(start, end)?)
    }
}
