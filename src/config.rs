//! Dashboard client configuration, read from a TOML file.
//!
//! ```toml
//! [server]
//! base_url = "http://192.168.1.20:5000"
//! request_timeout_secs = 10
//!
//! [polling]
//! telemetry_interval_secs = 10
//! weather_interval_secs = 600
//!
//! [chart]
//! window = 60
//!
//! [weather]
//! city = "Le Petit-Quevilly,FR"
//!
//! [drought]
//! department = "76"
//! ```
//!
//! Every key is optional; missing ones take the defaults above.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::chart::CHART_WINDOW;
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub chart: ChartConfig,
    pub weather: WeatherConfig,
    pub drought: DroughtConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub telemetry_interval_secs: u64,
    pub weather_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub window: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DroughtConfig {
    pub department: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_secs: 10,
            weather_interval_secs: 600,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: CHART_WINDOW,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: "Le Petit-Quevilly,FR".to_string(),
        }
    }
}

impl Default for DroughtConfig {
    fn default() -> Self {
        Self {
            department: "76".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(content).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(DashboardError::Config("server.base_url is empty".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "server.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.polling.telemetry_interval_secs == 0 || self.polling.weather_interval_secs == 0 {
            return Err(DashboardError::Config(
                "polling intervals must be positive".to_string(),
            ));
        }
        if self.chart.window == 0 {
            return Err(DashboardError::Config("chart.window must be positive".to_string()));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_secs(self.polling.telemetry_interval_secs)
    }

    pub fn weather_interval(&self) -> Duration {
        Duration::from_secs(self.polling.weather_interval_secs)
    }
}
