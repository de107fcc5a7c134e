mod args;
mod terminal;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use home_telemetry::{
    api::DashboardClient,
    config::DashboardConfig,
    drought::DroughtLevel,
    logging::init_logging,
    poll::Dashboard,
    session::DashboardSession,
};
use tracing::{info, warn};

use crate::terminal::TerminalChart;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = DashboardConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;
    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }
    if let Some(city) = args.city {
        config.weather.city = city;
    }
    config.validate().context("invalid config")?;

    let client = DashboardClient::new(&config.server.base_url, config.request_timeout())
        .context("failed to build HTTP client")?;

    match client.drought(&config.drought.department).await {
        Ok(dep) => {
            let level: DroughtLevel = dep.niveau_gravite_max;
            info!(department = %dep.code, level = level.as_str(), "{}", level.message());
        }
        Err(err) => warn!("drought status unavailable: {err}"),
    }

    let dashboard = Dashboard::new(
        client,
        DashboardSession::new(args.timezone),
        TerminalChart,
        config.chart.window,
        config.weather.city.clone(),
    );

    let telemetry = dashboard.spawn_telemetry(config.telemetry_interval());
    let weather = dashboard.spawn_weather(config.weather_interval());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    info!("shutting down");
    telemetry.abort();
    weather.abort();

    Ok(())
}
