use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "TZ")]
    pub timezone: Tz,

    /// Overrides `server.base_url` from the config file.
    #[arg(long, env = "DASHBOARD_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides `weather.city`.
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}
