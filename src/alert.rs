//! Threshold alerting.
//!
//! The server decides whether the latest reading breaches the configured
//! bounds; this side only interprets `/api/check_alert` and keeps a single
//! notice visible or hidden accordingly.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::telemetry::RawValue;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
}

impl AlertThresholds {
    pub fn validate(&self) -> Result<()> {
        let values = [self.temp_min, self.temp_max, self.humidity_min, self.humidity_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DashboardError::InvalidThresholds(
                "thresholds must be finite numbers".to_string(),
            ));
        }
        if self.temp_min > self.temp_max {
            return Err(DashboardError::InvalidThresholds(format!(
                "temperature min {} is above max {}",
                self.temp_min, self.temp_max
            )));
        }
        if self.humidity_min > self.humidity_max {
            return Err(DashboardError::InvalidThresholds(format!(
                "humidity min {} is above max {}",
                self.humidity_min, self.humidity_max
            )));
        }

        Ok(())
    }

    /// Same rule the server applies: strictly outside either band.
    pub fn is_breached_by(&self, temperature: f64, humidity: f64) -> bool {
        temperature < self.temp_min
            || temperature > self.temp_max
            || humidity < self.humidity_min
            || humidity > self.humidity_max
    }
}

/// Body of `GET /api/check_alert`. Values are only echoed when `alert` is true,
/// as numbers or as the database's decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlertCheck {
    pub alert: bool,
    #[serde(default)]
    pub temperature: Option<RawValue>,
    #[serde(default)]
    pub humidity: Option<RawValue>,
    #[serde(default)]
    pub temp_min: Option<RawValue>,
    #[serde(default)]
    pub temp_max: Option<RawValue>,
    #[serde(default)]
    pub humidity_min: Option<RawValue>,
    #[serde(default)]
    pub humidity_max: Option<RawValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertState {
    Clear,
    Breached {
        temperature: f64,
        humidity: f64,
        thresholds: AlertThresholds,
        /// Notice text, built from the values as the server sent them.
        message: String,
    },
}

impl AlertState {
    pub fn from_check(check: &AlertCheck) -> Result<Self> {
        if !check.alert {
            return Ok(AlertState::Clear);
        }

        let field = |name: &str, value: Option<&RawValue>| {
            let raw = value
                .ok_or_else(|| DashboardError::Decode(format!("alert response without {name}")))?;
            let number = raw
                .as_f64()
                .ok_or_else(|| DashboardError::Decode(format!("alert {name} is not a number: {raw}")))?;
            Ok::<_, DashboardError>((number, raw.to_string()))
        };

        let (temperature, temperature_text) = field("temperature", check.temperature.as_ref())?;
        let (humidity, humidity_text) = field("humidity", check.humidity.as_ref())?;
        let (temp_min, temp_min_text) = field("temp_min", check.temp_min.as_ref())?;
        let (temp_max, temp_max_text) = field("temp_max", check.temp_max.as_ref())?;
        let (humidity_min, humidity_min_text) = field("humidity_min", check.humidity_min.as_ref())?;
        let (humidity_max, humidity_max_text) = field("humidity_max", check.humidity_max.as_ref())?;

        Ok(AlertState::Breached {
            temperature,
            humidity,
            thresholds: AlertThresholds {
                temp_min,
                temp_max,
                humidity_min,
                humidity_max,
            },
            message: format!(
                "Alerte seuil : Temp={temperature_text}°C (min {temp_min_text}°C / max {temp_max_text}°C), \
                 Hum={humidity_text}% (min {humidity_min_text}% / max {humidity_max_text}%)"
            ),
        })
    }

    pub fn is_breached(&self) -> bool {
        matches!(self, AlertState::Breached { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AlertState::Breached { message, .. } => Some(message),
            AlertState::Clear => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeChange {
    Shown(String),
    Updated(String),
    Hidden,
    Unchanged,
}

/// The one on-screen alert notice of a dashboard session.
#[derive(Debug, Clone, Default)]
pub struct AlertNotice {
    text: Option<String>,
    visible: bool,
}

impl AlertNotice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last message shown. Hiding the notice keeps it.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Applies one evaluation. A failed evaluation leaves the notice as it was.
    pub fn apply(&mut self, evaluation: Result<AlertState>) -> NoticeChange {
        let state = match evaluation {
            Ok(state) => state,
            Err(err) => {
                warn!("alert check failed, keeping previous notice: {err}");
                return NoticeChange::Unchanged;
            }
        };

        match state.message().map(str::to_string) {
            Some(message) => {
                let change = if !self.visible {
                    warn!("{message}");
                    NoticeChange::Shown(message.clone())
                } else if self.text.as_deref() != Some(message.as_str()) {
                    warn!("{message}");
                    NoticeChange::Updated(message.clone())
                } else {
                    NoticeChange::Unchanged
                };
                self.text = Some(message);
                self.visible = true;
                change
            }
            None if self.visible => {
                info!("alert cleared");
                self.visible = false;
                NoticeChange::Hidden
            }
            None => NoticeChange::Unchanged,
        }
    }
}

/// Acknowledgement of `POST /save-alert-config`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
