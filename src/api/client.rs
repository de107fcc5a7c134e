use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::alert::{AlertCheck, AlertState, AlertThresholds, SaveAck};
use crate::api::UserStatus;
use crate::drought::{DepartmentDrought, normalize_department_code};
use crate::error::{DashboardError, Result};
use crate::telemetry::RawRecord;
use crate::weather::{UvIndex, WeatherReport};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-mostly client for the dashboard server.
///
/// Non-success statuses map to [`DashboardError::Network`], bodies that are
/// not the expected JSON to [`DashboardError::Decode`].
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DashboardError::Config("empty base URL".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /data`: the full telemetry log.
    ///
    /// Only the outer array must decode. Odd entries are left for
    /// normalization to reject one by one.
    pub async fn fetch_telemetry(&self) -> Result<Vec<RawRecord>> {
        let entries: Vec<serde_json::Value> = self.get_json("/data", &[]).await?;
        Ok(entries.into_iter().map(RawRecord::from_value).collect())
    }

    pub async fn check_alert(&self) -> Result<AlertCheck> {
        self.get_json("/api/check_alert", &[]).await
    }

    /// Queries the threshold check and interprets it.
    pub async fn evaluate_alert(&self) -> Result<AlertState> {
        AlertState::from_check(&self.check_alert().await?)
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherReport> {
        self.get_json("/api/weather", &[("city", city)]).await
    }

    pub async fn uv(&self, city: &str) -> Result<UvIndex> {
        self.get_json("/api/uv", &[("city", city)]).await
    }

    pub async fn drought(&self, department: &str) -> Result<DepartmentDrought> {
        let code = normalize_department_code(department)?;
        self.get_json("/api/secheresse", &[("code", code.as_str())])
            .await
    }

    pub async fn drought_all(&self) -> Result<Vec<DepartmentDrought>> {
        self.get_json("/api/secheresse_all", &[]).await
    }

    pub async fn user_status(&self) -> Result<UserStatus> {
        self.get_json("/user/status", &[]).await
    }

    /// Validates and posts new thresholds. Requires an admin session server-side.
    pub async fn save_alert_config(&self, thresholds: &AlertThresholds) -> Result<SaveAck> {
        thresholds.validate()?;

        let url = self.url("/save-alert-config");
        debug!(%url, "POST");
        let response = self.client.post(&url).json(thresholds).send().await?;

        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");

        let response = self.client.get(&url).query(query).send().await?;

        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        return Err(DashboardError::Network(format!("{url} returned status {status}")));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| DashboardError::Decode(format!("{url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_base_url() {
        let client = DashboardClient::new(" http://localhost:5000/ ", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/data"), "http://localhost:5000/data");
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        assert!(matches!(
            DashboardClient::new("  ", DEFAULT_TIMEOUT),
            Err(DashboardError::Config(_))
        ));
    }
}
