//! Outdoor weather and UV panel, fed by the `/api/weather` and `/api/uv`
//! passthroughs of the OpenWeather current-conditions schema.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub main: MainReadings,
    pub wind: Wind,
    pub clouds: Clouds,
    #[serde(default)]
    pub visibility: f64,
    pub sys: SunTimes,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UvIndex {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Moon,
    Sun,
    Cloud,
    HeavyRain,
    Rain,
    Bolt,
    Snowflake,
    Smog,
    Unknown,
}

impl WeatherIcon {
    pub fn from_condition(condition: &str, is_night: bool) -> Self {
        if is_night {
            return WeatherIcon::Moon;
        }

        match condition.to_lowercase().as_str() {
            "clear" => WeatherIcon::Sun,
            "clouds" => WeatherIcon::Cloud,
            "rain" => WeatherIcon::HeavyRain,
            "drizzle" => WeatherIcon::Rain,
            "thunderstorm" => WeatherIcon::Bolt,
            "snow" => WeatherIcon::Snowflake,
            "mist" | "fog" | "haze" => WeatherIcon::Smog,
            _ => WeatherIcon::Unknown,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            WeatherIcon::Moon => "fa-moon",
            WeatherIcon::Sun => "fa-sun",
            WeatherIcon::Cloud => "fa-cloud",
            WeatherIcon::HeavyRain => "fa-cloud-showers-heavy",
            WeatherIcon::Rain => "fa-cloud-rain",
            WeatherIcon::Bolt => "fa-bolt",
            WeatherIcon::Snowflake => "fa-snowflake",
            WeatherIcon::Smog => "fa-smog",
            WeatherIcon::Unknown => "fa-question",
        }
    }
}

/// Display-ready weather panel.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_kmh: String,
    pub wind_direction: &'static str,
    pub cloudiness: f64,
    pub visibility_km: String,
    pub sunrise: String,
    pub sunset: String,
    pub day_length: String,
    pub is_night: bool,
    pub icon: WeatherIcon,
    pub uv_index: f64,
}

impl WeatherSummary {
    pub fn new(report: &WeatherReport, uv: UvIndex, now_unix: i64, timezone: Tz) -> Result<Self> {
        let sunrise = report.sys.sunrise;
        let sunset = report.sys.sunset;
        let is_night = now_unix < sunrise || now_unix > sunset;
        let condition = report.weather.first().map(|c| c.main.as_str()).unwrap_or("");

        Ok(Self {
            temperature: format!("{:.1}", report.main.temp),
            feels_like: format!("{:.1}", report.main.feels_like),
            temp_min: format!("{:.1}", report.main.temp_min),
            temp_max: format!("{:.1}", report.main.temp_max),
            humidity: report.main.humidity,
            pressure: report.main.pressure,
            wind_kmh: format!("{:.1}", report.wind.speed * 3.6),
            wind_direction: cardinal_direction(report.wind.deg),
            cloudiness: report.clouds.all,
            visibility_km: format!("{:.1}", report.visibility / 1000.0),
            sunrise: clock_time(sunrise, timezone)?,
            sunset: clock_time(sunset, timezone)?,
            day_length: format_duration(sunset - sunrise),
            is_night,
            icon: WeatherIcon::from_condition(condition, is_night),
            uv_index: uv.value,
        })
    }
}

/// 8-point compass direction for a bearing in degrees.
pub fn cardinal_direction(degrees: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((degrees / 45.0).round() as i64).rem_euclid(8);
    DIRECTIONS[index as usize]
}

pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}h {}min", seconds / 3600, (seconds % 3600) / 60)
}

fn clock_time(unix: i64, timezone: Tz) -> Result<String> {
    let instant = DateTime::from_timestamp(unix, 0)
        .ok_or_else(|| DashboardError::Decode(format!("timestamp out of range: {unix}")))?;
    Ok(instant.with_timezone(&timezone).format("%H:%M").to_string())
}
