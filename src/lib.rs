//! Headless client for the home monitoring dashboard.
//!
//! Polls the dashboard API for temperature/humidity telemetry, keeps a
//! sorted in-memory cache, renders charts through a [`chart::ChartSink`],
//! exports to CSV/XLSX and tracks threshold alerts.

pub mod alert;
pub mod api;
pub mod chart;
pub mod config;
pub mod drought;
pub mod error;
pub mod export;
pub mod logging;
pub mod poll;
pub mod session;
pub mod telemetry;
pub mod weather;

pub use error::{DashboardError, Result};
